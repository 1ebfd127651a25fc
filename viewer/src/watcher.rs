use std::{
    io,
    path::{Path, PathBuf},
    time::Instant,
};

use config::KeyboardLayout;
use notify::{
    event::{AccessKind::Close, AccessMode::Write},
    recommended_watcher, Event,
    EventKind::Access,
    RecommendedWatcher, RecursiveMode, Watcher,
};

use crate::update::{SceneUpdate, SceneUpdater};

/// A file watcher reloading the keyboard layout upon file change.
pub struct FileWatcher {
    layout_path: PathBuf,
    updater: SceneUpdater,
}

impl FileWatcher {
    /// Creates a new watcher for the given layout file path.
    ///
    /// Upon file change, the layout is parsed again and sent to the scene via
    /// the given updater.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the file path could not be canonicalized.
    pub fn try_new(layout_path: &Path, updater: SceneUpdater) -> Result<Self, Error> {
        let layout_path = layout_path.canonicalize()?;

        Ok(Self {
            layout_path,
            updater,
        })
    }

    /// Starts watching the layout file in a different thread.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if watching the file was unsuccessful.
    pub fn watch(self) -> Result<RecommendedWatcher, Error> {
        let layout_path_parent = self
            .layout_path
            .parent()
            .expect("canonical file path should have a parent")
            .to_path_buf();

        let mut watcher = recommended_watcher(move |result: notify::Result<Event>| {
            if let Ok(event) = result {
                if matches!(event.kind, Access(Close(Write)))
                    && event.paths.iter().any(|path| path == &self.layout_path)
                {
                    self.reload_layout();
                }
            }
        })?;

        watcher.watch(&layout_path_parent, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }

    /// Parses the layout file and sends the result to the scene.
    fn reload_layout(&self) {
        let start = Instant::now();

        match KeyboardLayout::try_from_path(&self.layout_path) {
            Ok(layout) => {
                self.updater.send_update(SceneUpdate::Layout(layout));
                eprintln!("Reloaded layout in {:?}", start.elapsed());
            }
            Err(error) => self.updater.send_update(SceneUpdate::Error(error)),
        }
    }
}

/// The error type for errors regarding watching the layout file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to canonicalize file path.
    #[error("failed to canonicalize file path")]
    Canonicalize(#[from] io::Error),
    /// Failed to initialize file watcher.
    #[error("failed to initialize file watcher")]
    Notify(#[from] notify::Error),
}
