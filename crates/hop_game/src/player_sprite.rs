//! The player as drawn: kinematic body plus its sprite-sheet animation.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use hop_core::{AnimationHandler, Direction, PlayerBody, PlayerState};
use image::{imageops, RgbaImage};

use crate::assets::{AssetError, AssetStore};
use crate::error::GameError;
use crate::settings::Settings;

/// Sheets are a single row of square, right-facing frames.
pub fn sheet_file(state: PlayerState) -> String {
    format!("player_{}.png", state.label())
}

pub fn slice_sheet(file: &str, sheet: &RgbaImage) -> Result<Vec<RgbaImage>, AssetError> {
    let (width, height) = sheet.dimensions();
    if height == 0 || width == 0 || width % height != 0 {
        return Err(AssetError::SpriteSheet {
            file: file.to_string(),
            width,
            height,
        });
    }
    Ok((0..width / height)
        .map(|i| imageops::crop_imm(sheet, i * height, 0, height, height).to_image())
        .collect())
}

pub struct PlayerSprite {
    body: PlayerBody,
    animation: AnimationHandler<Arc<RgbaImage>>,
    size: u32,
}

impl PlayerSprite {
    pub fn load(
        assets: &mut AssetStore,
        settings: &Settings,
        position: Vec2,
    ) -> Result<Self, GameError> {
        let mut frames = HashMap::new();
        let mut size = 0u32;
        for state in PlayerState::ALL {
            let file = sheet_file(state);
            let sheet = assets.load_image(&file)?;
            let right = slice_sheet(&file, &sheet)?;
            size = size.max(sheet.height());
            let left: Vec<_> = right
                .iter()
                .map(|frame| Arc::new(imageops::flip_horizontal(frame)))
                .collect();
            frames.insert((state, Direction::Left), left);
            frames.insert((state, Direction::Right), right.into_iter().map(Arc::new).collect());
        }
        let animation = AnimationHandler::new(frames, settings.animation_frequencies.clone())?;

        Ok(Self {
            body: PlayerBody::new(position, settings.player),
            animation,
            size,
        })
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut PlayerBody {
        &mut self.body
    }

    pub fn animation(&self) -> &AnimationHandler<Arc<RgbaImage>> {
        &self.animation
    }

    /// Side of the square sprite, in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn update_animation(&mut self, dt_ms: u64) {
        self.animation
            .update(self.body.state(), self.body.direction(), dt_ms);
    }

    pub fn frame(&self) -> &RgbaImage {
        self.animation.image()
    }
}
