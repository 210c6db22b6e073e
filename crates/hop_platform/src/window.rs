use std::sync::Arc;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub cursor_visible: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Hopper".to_string(),
            width: 1280,
            height: 720,
            cursor_visible: false,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop.create_window(attrs)?;
    window.set_cursor_visible(config.cursor_visible);
    Ok(Arc::new(window))
}
