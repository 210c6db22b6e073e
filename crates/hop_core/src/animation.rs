//! Frame-indexed sprite animation keyed by logical state and facing direction.
//!
//! Each `(PlayerState, Direction)` pair owns a fixed, non-empty list of frames
//! and each state a playback frequency in frames per second. The handler only
//! stores the active pair and how long it has been active; the frame to draw
//! is derived from that:
//!
//! ```text
//! index = floor(elapsed_ms * frequency / 1000) % frame_count
//! ```
//!
//! Animations always loop. Switching state *or* direction restarts at frame 0.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Run,
    Jump,
}

impl PlayerState {
    pub const ALL: [PlayerState; 3] = [PlayerState::Idle, PlayerState::Run, PlayerState::Jump];

    /// Vertical motion wins over horizontal motion: a player moving sideways
    /// while airborne is jumping, not running.
    pub fn from_velocity(vx: f32, vy: f32) -> Self {
        if vy != 0.0 {
            Self::Jump
        } else if vx != 0.0 {
            Self::Run
        } else {
            Self::Idle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Jump => "jump",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("no frames for state '{}' facing {direction:?}", .state.label())]
    MissingFrames {
        state: PlayerState,
        direction: Direction,
    },
    #[error("no frequency configured for state '{}'", .0.label())]
    MissingFrequency(PlayerState),
    #[error("frequency for state '{}' must be greater than zero", .0.label())]
    ZeroFrequency(PlayerState),
}

pub struct AnimationHandler<F> {
    frames: HashMap<(PlayerState, Direction), Vec<F>>,
    frequencies: HashMap<PlayerState, u32>,
    current_state: PlayerState,
    current_direction: Direction,
    elapsed_ms: u64,
}

impl<F> AnimationHandler<F> {
    /// Every state/direction pair needs at least one frame and every state a
    /// non-zero frequency. Playback starts idle, facing right.
    pub fn new(
        frames: HashMap<(PlayerState, Direction), Vec<F>>,
        frequencies: HashMap<PlayerState, u32>,
    ) -> Result<Self, AnimationError> {
        for state in PlayerState::ALL {
            match frequencies.get(&state) {
                None => return Err(AnimationError::MissingFrequency(state)),
                Some(0) => return Err(AnimationError::ZeroFrequency(state)),
                Some(_) => {}
            }
            for direction in Direction::ALL {
                if frames.get(&(state, direction)).is_none_or(|f| f.is_empty()) {
                    return Err(AnimationError::MissingFrames { state, direction });
                }
            }
        }

        Ok(Self {
            frames,
            frequencies,
            current_state: PlayerState::Idle,
            current_direction: Direction::Right,
            elapsed_ms: 0,
        })
    }

    pub fn current_state(&self) -> PlayerState {
        self.current_state
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn frame_count(&self, state: PlayerState, direction: Direction) -> usize {
        self.frames.get(&(state, direction)).map_or(0, Vec::len)
    }

    pub fn update(&mut self, state: PlayerState, direction: Direction, dt_ms: u64) {
        if state != self.current_state || direction != self.current_direction {
            self.current_state = state;
            self.current_direction = direction;
            self.elapsed_ms = 0;
        } else {
            self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        }
    }

    pub fn frame_index(&self) -> usize {
        let frequency = self.frequencies[&self.current_state] as u64;
        let count = self.frame_count(self.current_state, self.current_direction) as u64;
        ((self.elapsed_ms.saturating_mul(frequency) / 1000) % count) as usize
    }

    pub fn image(&self) -> &F {
        &self.frames[&(self.current_state, self.current_direction)][self.frame_index()]
    }
}
