use glam::Vec2;
use serde::Deserialize;

use crate::animation::{Direction, PlayerState};

/// Tuning values for the player body. Speeds are pixels per second, `weight`
/// is the downward acceleration in pixels per second squared.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_speed: f32,
    pub jump_speed: f32,
    pub weight: f32,
    pub max_available_jumps: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_speed: 420.0,
            jump_speed: 1100.0,
            weight: 2600.0,
            max_available_jumps: 2,
        }
    }
}

/// Kinematic state of the player: position, velocity, facing and jump budget.
///
/// Screen coordinates: y grows downwards, so a jump sets a negative `vy`.
/// All integration is `value += rate * dt_ms / 1000`; there is no division by
/// the elapsed time, so a zero-length frame is a no-op. Ground and roof
/// contact are reported by the caller through `hit_ground` / `hit_roof`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    position: Vec2,
    vx: f32,
    vy: f32,
    available_jumps: u32,
    direction: Direction,
    config: PlayerConfig,
}

impl PlayerBody {
    pub fn new(position: Vec2, config: PlayerConfig) -> Self {
        Self {
            position,
            vx: 0.0,
            vy: 0.0,
            available_jumps: config.max_available_jumps,
            direction: Direction::Right,
            config,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_available_jumps(mut self, available_jumps: u32) -> Self {
        self.available_jumps = available_jumps;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    pub fn available_jumps(&self) -> u32 {
        self.available_jumps
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> PlayerState {
        PlayerState::from_velocity(self.vx, self.vy)
    }

    pub fn jump(&mut self) {
        if self.available_jumps == 0 {
            return;
        }
        self.available_jumps -= 1;
        self.vy = -self.config.jump_speed;
    }

    pub fn move_left(&mut self) {
        self.vx = -self.config.max_speed;
        self.direction = Direction::Left;
    }

    pub fn move_right(&mut self) {
        self.vx = self.config.max_speed;
        self.direction = Direction::Right;
    }

    pub fn stop_horizontal_movement(&mut self) {
        self.vx = 0.0;
    }

    pub fn apply_gravity(&mut self, dt_ms: u64) {
        self.vy += self.config.weight * dt_ms as f32 / 1000.0;
    }

    pub fn update_horizontal_pos(&mut self, dt_ms: u64) {
        self.position.x += self.vx * dt_ms as f32 / 1000.0;
    }

    pub fn update_vertical_pos(&mut self, dt_ms: u64) {
        self.position.y += self.vy * dt_ms as f32 / 1000.0;
    }

    pub fn hit_ground(&mut self) {
        self.vy = 0.0;
        self.available_jumps = self.config.max_available_jumps;
    }

    pub fn hit_roof(&mut self) {
        self.vy = 0.0;
    }
}
