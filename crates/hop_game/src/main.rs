//! Hopper: a small platformer. Pick a language, open the menu, jump around.
//!
//! Scenes run one at a time inside a winit event loop; see `app` for the
//! frame structure and `game_loop` for how scenes hand over to each other.

mod app;
mod assets;
mod audio;
mod error;
mod game_loop;
mod i18n;
mod player_sprite;
mod scene;
mod scenes;
mod settings;
#[cfg(test)]
mod testutil;

use std::path::Path;

use winit::event_loop::{ControlFlow, EventLoop};

use app::App;
use error::GameError;
use settings::{Settings, SETTINGS_PATH};

fn main() -> Result<(), GameError> {
    let settings_path = Path::new(SETTINGS_PATH);
    let settings = Settings::load_or_default(settings_path)?;
    hop_platform::logging::init_file_logger(&settings.log_file, &settings.log_level)?;
    if !settings_path.exists() {
        log::warn!("Settings file '{}' not found, using defaults", settings_path.display());
    }
    log::info!("Run the game");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
