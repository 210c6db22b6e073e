//! CPU back-buffer every scene draws into.
//!
//! The canvas has a fixed resolution independent of the window; the
//! [`Presenter`](crate::Presenter) scales it to whatever the window is. All
//! drawing operations clip against the canvas bounds, so callers can pass
//! partially or fully off-screen rectangles.

use image::{imageops, RgbaImage};

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];
pub const RED: Color = [255, 0, 0, 255];

/// Axis-aligned integer rectangle, top-left origin, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn center_x(&self) -> i32 {
        self.x + (self.width / 2) as i32
    }

    pub fn center_y(&self) -> i32 {
        self.y + (self.height / 2) as i32
    }

    /// Same size, moved so its center lands on `(cx, cy)`.
    pub fn with_center(self, cx: i32, cy: i32) -> Self {
        Self {
            x: cx - (self.width / 2) as i32,
            y: cy - (self.height / 2) as i32,
            ..self
        }
    }

    /// Grown by `amount` pixels on every side.
    pub fn inflate(self, amount: u32) -> Self {
        Self {
            x: self.x - amount as i32,
            y: self.y - amount as i32,
            width: self.width + 2 * amount,
            height: self.height + 2 * amount,
        }
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(BLACK)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw RGBA8 bytes, row-major, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        Some(self.image.get_pixel(x as u32, y as u32).0)
    }

    pub fn fill(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            pixel.0 = color;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let patch = RgbaImage::from_pixel(rect.width, rect.height, image::Rgba(color));
        imageops::replace(&mut self.image, &patch, rect.x as i64, rect.y as i64);
    }

    /// Outline drawn inside `rect`. A `line_width` of zero fills the rectangle.
    pub fn draw_rect(&mut self, rect: Rect, color: Color, line_width: u32) {
        if line_width == 0 || line_width * 2 >= rect.width.min(rect.height) {
            self.fill_rect(rect, color);
            return;
        }
        let w = line_width;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - w as i32, rect.width, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y, w, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - w as i32, rect.y, w, rect.height), color);
    }

    /// Alpha-blends `src` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, src: &RgbaImage, x: i32, y: i32) {
        imageops::overlay(&mut self.image, src, x as i64, y as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: Color) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba(color))
    }

    #[test]
    fn new_canvas_is_black() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(canvas.pixel(3, 2), Some(BLACK));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.pixel(-1, 0), None);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(-2, 2, 4, 10), WHITE);
        assert_eq!(canvas.pixel(0, 2), Some(WHITE));
        assert_eq!(canvas.pixel(1, 3), Some(WHITE));
        assert_eq!(canvas.pixel(2, 2), Some(BLACK));
        assert_eq!(canvas.pixel(0, 1), Some(BLACK));

        // Entirely off-screen is a no-op rather than a panic.
        canvas.fill_rect(Rect::new(100, 100, 5, 5), RED);
        canvas.fill_rect(Rect::new(-10, -10, 5, 5), RED);
    }

    #[test]
    fn draw_rect_outlines_inside_the_rect() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_rect(Rect::new(1, 1, 8, 8), RED, 2);
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 5), Some(RED));
        assert_eq!(canvas.pixel(8, 8), Some(RED));
        assert_eq!(canvas.pixel(3, 3), Some(BLACK));
        assert_eq!(canvas.pixel(6, 6), Some(BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(9, 9), Some(BLACK));
    }

    #[test]
    fn blit_copies_opaque_and_skips_transparent_pixels() {
        let mut canvas = Canvas::new(6, 6);
        let mut sprite = solid(2, 2, WHITE);
        sprite.put_pixel(1, 1, image::Rgba([255, 0, 0, 0]));
        canvas.blit(&sprite, 2, 3);
        assert_eq!(canvas.pixel(2, 3), Some(WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(WHITE));
        assert_eq!(canvas.pixel(3, 4), Some(BLACK));
        assert_eq!(canvas.pixel(1, 3), Some(BLACK));
    }

    #[test]
    fn blit_blends_translucent_pixels() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(WHITE);
        canvas.blit(&solid(1, 1, [0, 0, 0, 128]), 0, 0);
        let [r, g, b, a] = canvas.pixel(0, 0).expect("in bounds");
        assert_eq!(a, 255);
        assert!((126..=128).contains(&r), "half-transparent black over white gave {r}");
        assert_eq!((r, r), (g, b));
    }

    #[test]
    fn blit_partially_off_screen() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blit(&solid(3, 3, RED), -2, 3);
        assert_eq!(canvas.pixel(0, 3), Some(RED));
        assert_eq!(canvas.pixel(1, 3), Some(BLACK));

        canvas.blit(&solid(3, 3, WHITE), 3, -2);
        assert_eq!(canvas.pixel(3, 0), Some(WHITE));
        assert_eq!(canvas.pixel(2, 0), Some(BLACK));
        canvas.blit(&solid(2, 2, WHITE), 50, 50);
        canvas.blit(&solid(2, 2, WHITE), -50, -50);
    }

    #[test]
    fn rect_helpers() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!((rect.right(), rect.bottom()), (40, 60));
        assert_eq!((rect.center_x(), rect.center_y()), (25, 40));
        assert_eq!(rect.with_center(0, 0), Rect::new(-15, -20, 30, 40));
        assert_eq!(rect.inflate(5), Rect::new(5, 15, 40, 50));
    }
}
