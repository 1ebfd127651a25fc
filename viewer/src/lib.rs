//! The `viewer` crate contains everything related to visualizing the keyboard.

mod assets;
mod gui;
mod material;
mod objects;
mod scene;
mod update;
mod watcher;
mod window;

pub use update::{SceneUpdate, SceneUpdater};
pub use watcher::{Error as WatcherError, FileWatcher};
pub use window::Window;
