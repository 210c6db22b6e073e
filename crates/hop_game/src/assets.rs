//! Loading of images, fonts and sounds from the assets directory.
//!
//! Images are decoded once and shared: repeated `load_image` calls for the
//! same file name return the same `Arc`. Fonts are cached by file the same
//! way, each `load_font` call only picks a new pixel size.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use hop_render::Color;
use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: '{}'", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode image '{}': {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to parse font '{}': {source}", .path.display())]
    Font {
        path: PathBuf,
        source: ab_glyph::InvalidFont,
    },
    #[error("failed to decode sound '{}': {source}", .path.display())]
    Sound {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    #[error("sprite sheet '{file}' is {width}x{height}, not a row of square frames")]
    SpriteSheet { file: String, width: u32, height: u32 },
}

pub struct AssetStore {
    images_dir: PathBuf,
    fonts_dir: PathBuf,
    sounds_dir: PathBuf,
    images: HashMap<String, Arc<RgbaImage>>,
    fonts: HashMap<String, Arc<FontVec>>,
}

impl AssetStore {
    /// Expects `images/`, `fonts/` and `sounds/` under `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            images_dir: root.join("images"),
            fonts_dir: root.join("fonts"),
            sounds_dir: root.join("sounds"),
            images: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    pub fn load_image(&mut self, file: &str) -> Result<Arc<RgbaImage>, AssetError> {
        if let Some(image) = self.images.get(file) {
            return Ok(Arc::clone(image));
        }
        let path = existing(self.images_dir.join(file))?;
        log::info!("Load image '{}'", path.display());
        let image = image::open(&path)
            .map_err(|source| AssetError::Image {
                path: path.clone(),
                source,
            })?
            .to_rgba8();
        let image = Arc::new(image);
        self.images.insert(file.to_string(), Arc::clone(&image));
        Ok(image)
    }

    /// Number of distinct images decoded so far.
    pub fn cached_images(&self) -> usize {
        self.images.len()
    }

    pub fn load_font(&mut self, file: &str, size: f32) -> Result<FontHandle, AssetError> {
        let path = self.fonts_dir.join(file);
        log::info!("Load font '{}' with size {}", path.display(), size);
        let font = match self.fonts.get(file) {
            Some(font) => Arc::clone(font),
            None => {
                let path = existing(path)?;
                let bytes = read(&path)?;
                let font = FontVec::try_from_vec(bytes)
                    .map_err(|source| AssetError::Font { path, source })?;
                let font = Arc::new(font);
                self.fonts.insert(file.to_string(), Arc::clone(&font));
                font
            }
        };
        Ok(FontHandle {
            font,
            scale: PxScale::from(size),
        })
    }

    /// The file is decoded once here so a broken sound fails at load time
    /// rather than when it is first played.
    pub fn load_sound(&mut self, file: &str) -> Result<SoundHandle, AssetError> {
        let path = existing(self.sounds_dir.join(file))?;
        log::info!("Load sound '{}'", path.display());
        let bytes: Arc<[u8]> = read(&path)?.into();
        let sound = SoundHandle { path, bytes };
        sound.decoder().map_err(|source| AssetError::Sound {
            path: sound.path.clone(),
            source,
        })?;
        Ok(sound)
    }
}

fn existing(path: PathBuf) -> Result<PathBuf, AssetError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::NotFound { path })
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A font at a fixed pixel size.
#[derive(Clone)]
pub struct FontHandle {
    font: Arc<FontVec>,
    scale: PxScale,
}

impl FontHandle {
    pub fn size(&self) -> f32 {
        self.scale.y
    }

    /// Rasterizes a single line of text onto a transparent image that is
    /// exactly as wide as the advance of `text` and one line tall.
    pub fn render(&self, text: &str, color: Color) -> RgbaImage {
        let scaled = self.font.as_scaled(self.scale);
        let ascent = scaled.ascent();
        let height = (ascent - scaled.descent()).ceil().max(1.0) as u32;

        let mut caret = 0.0f32;
        let mut previous = None;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, ascent)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let width = caret.ceil().max(1.0) as u32;
        let mut image = RgbaImage::new(width, height);
        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let px = bounds.min.x as i32 + x as i32;
                let py = bounds.min.y as i32 + y as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                // Overlapping glyph edges keep the stronger coverage.
                if alpha > pixel.0[3] {
                    pixel.0 = [color[0], color[1], color[2], alpha];
                }
            });
        }
        image
    }
}

/// Encoded sound data kept in memory; each playback decodes a fresh stream.
#[derive(Clone)]
pub struct SoundHandle {
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl SoundHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn decoder(
        &self,
    ) -> Result<rodio::Decoder<Cursor<Arc<[u8]>>>, rodio::decoder::DecoderError> {
        rodio::Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assets_dir, temp_dir_path};
    use hop_render::canvas::RED;

    #[test]
    fn load_image_decodes_rgba() {
        let mut store = AssetStore::new(&assets_dir());
        let flag = store.load_image("flag_en.png").expect("flag image");
        assert!(flag.width() > 0 && flag.height() > 0);
    }

    #[test]
    fn load_image_is_memoized() {
        let mut store = AssetStore::new(&assets_dir());
        let first = store.load_image("flag_fr.png").expect("flag image");
        let second = store.load_image("flag_fr.png").expect("flag image");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.cached_images(), 1);

        store.load_image("flag_de.png").expect("flag image");
        assert_eq!(store.cached_images(), 2);
    }

    #[test]
    fn missing_files_are_not_found() {
        let mut store = AssetStore::new(&assets_dir());
        assert!(matches!(
            store.load_image("flag_xx.png"),
            Err(AssetError::NotFound { .. })
        ));
        assert!(matches!(
            store.load_font("nope.ttf", 12.0),
            Err(AssetError::NotFound { .. })
        ));
        assert!(matches!(
            store.load_sound("nope.wav"),
            Err(AssetError::NotFound { .. })
        ));
        assert_eq!(store.cached_images(), 0);
    }

    #[test]
    fn undecodable_files_report_their_kind() {
        let root = temp_dir_path("garbage_assets");
        for dir in ["images", "fonts", "sounds"] {
            fs::create_dir_all(root.join(dir)).expect("create asset dir");
        }
        fs::write(root.join("images").join("bad.png"), b"not a png").expect("write");
        fs::write(root.join("fonts").join("bad.ttf"), b"not a font").expect("write");
        fs::write(root.join("sounds").join("bad.wav"), b"not a wav").expect("write");

        let mut store = AssetStore::new(&root);
        assert!(matches!(store.load_image("bad.png"), Err(AssetError::Image { .. })));
        assert!(matches!(store.load_font("bad.ttf", 10.0), Err(AssetError::Font { .. })));
        assert!(matches!(store.load_sound("bad.wav"), Err(AssetError::Sound { .. })));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn load_font_renders_text_in_the_requested_color() {
        let mut store = AssetStore::new(&assets_dir());
        let font = store.load_font("DejaVuSans-Bold.ttf", 50.0).expect("font");
        assert_eq!(font.size(), 50.0);

        let image = font.render("Hop", RED);
        assert!(image.height() >= 50);
        assert!(image.width() > 50);
        let opaque = image.pixels().filter(|p| p.0[3] == 255).count();
        assert!(opaque > 0, "glyph interiors are fully covered");
        assert!(image
            .pixels()
            .filter(|p| p.0[3] > 0)
            .all(|p| p.0[..3] == RED[..3]));
    }

    #[test]
    fn wider_text_renders_wider() {
        let mut store = AssetStore::new(&assets_dir());
        let font = store.load_font("DejaVuSans-Bold.ttf", 20.0).expect("font");
        assert!(font.render("New game", RED).width() > font.render("New", RED).width());
        assert_eq!(font.render("", RED).width(), 1);
    }

    #[test]
    fn load_sound_validates_and_replays() {
        let mut store = AssetStore::new(&assets_dir());
        let sound = store.load_sound("click.wav").expect("click sound");
        assert!(sound.path().ends_with("click.wav"));
        assert!(sound.decoder().is_ok());
        assert!(sound.decoder().is_ok(), "each playback gets its own decoder");
    }
}
