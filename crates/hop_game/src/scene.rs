//! Scenes and the state they share.
//!
//! Exactly one scene is active at a time. Scenes never replace themselves
//! directly: an input callback pushes the next scene on the [`SceneQueue`] and
//! the [`GameLoop`](crate::game_loop::GameLoop) installs it at the start of the
//! following tick.

use std::collections::VecDeque;

use hop_core::{Dispatch, EventSource};
use hop_devtools::PlayerStats;
use hop_render::Canvas;

use crate::assets::AssetStore;
use crate::audio::Audio;
use crate::error::GameError;
use crate::i18n::Localizer;
use crate::settings::Settings;

pub trait Scene {
    fn name(&self) -> &'static str;

    /// Drains `events` and runs at most one callback.
    fn handle_inputs(
        &mut self,
        events: &mut dyn EventSource,
        ctx: &mut SceneContext,
    ) -> Result<Dispatch, GameError>;

    fn update(&mut self, dt_ms: u64);

    fn render(&self, canvas: &mut Canvas);

    /// Shown in the debug overlay when the scene has a player.
    fn player_stats(&self) -> Option<PlayerStats> {
        None
    }
}

#[derive(Default)]
pub struct SceneQueue {
    pending: VecDeque<Box<dyn Scene>>,
}

impl SceneQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scene: Box<dyn Scene>) {
        log::info!("Queue scene '{}'", scene.name());
        self.pending.push_back(scene);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Scene>> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Everything a scene may touch besides its own model.
pub struct SceneContext {
    pub queue: SceneQueue,
    pub assets: AssetStore,
    pub i18n: Localizer,
    pub audio: Option<Audio>,
    pub settings: Settings,
}

impl SceneContext {
    pub fn new(settings: Settings, audio: Option<Audio>) -> Self {
        Self {
            queue: SceneQueue::new(),
            assets: AssetStore::new(&settings.assets_dir),
            i18n: Localizer::new(settings.i18n_dir()),
            audio,
            settings,
        }
    }
}
