mod level;
mod locale_selection;
mod menu;

pub use level::LevelScene;
pub use locale_selection::LocaleSelectionScene;
pub use menu::MenuScene;

use hop_render::Rect;

/// Red frame drawn around the selected item: `(rect, line_width)`, both
/// proportional to the canvas width.
pub fn cursor_outline(target: Rect, canvas_width: u32) -> (Rect, u32) {
    (target.inflate(canvas_width / 150), canvas_width / 400)
}
