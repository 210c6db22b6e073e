use hop_core::{AnimationError, SelectionError};
use hop_platform::logging::LoggingError;
use hop_render::GpuError;
use thiserror::Error;

use crate::assets::AssetError;
use crate::i18n::I18nError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    I18n(#[from] I18nError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Animation(#[from] AnimationError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
