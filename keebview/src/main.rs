//! This file starts the viewer: it loads the display configuration and the
//! keyboard layout, watches the layout file for changes and runs the render
//! loop.

use std::path::Path;

use color_eyre::{config::HookBuilder, Result};
use config::{Config, KeyboardLayout};
use viewer::{FileWatcher, SceneUpdate, Window};

fn main() -> Result<()> {
    HookBuilder::new().display_env_section(false).install()?;

    let config = Config::try_from_path(Path::new("config.toml"))?;
    let layout_path = Path::new("keyboard.toml");
    let layout = KeyboardLayout::try_from_path(layout_path)?;

    let window = Window::try_new()?;

    let updater = window.scene_updater();
    updater.send_update(SceneUpdate::Layout(layout));

    let watcher = FileWatcher::try_new(layout_path, updater)?;
    let _watcher = watcher.watch()?;

    window.run_render_loop(config);

    Ok(())
}
