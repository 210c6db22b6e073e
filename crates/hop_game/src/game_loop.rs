use hop_core::{Dispatch, EventSource};
use hop_render::Canvas;

use crate::error::GameError;
use crate::scene::{Scene, SceneContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Owns the active scene and the context every scene shares.
pub struct GameLoop {
    active: Box<dyn Scene>,
    ctx: SceneContext,
}

impl GameLoop {
    pub fn new(initial: Box<dyn Scene>, ctx: SceneContext) -> Self {
        log::info!("Start with scene '{}'", initial.name());
        Self {
            active: initial,
            ctx,
        }
    }

    pub fn active_scene(&self) -> &dyn Scene {
        self.active.as_ref()
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }

    /// One frame: install a queued scene if any, then input, update and
    /// render on the active scene. A quit request skips update and render.
    pub fn tick(
        &mut self,
        dt_ms: u64,
        events: &mut dyn EventSource,
        canvas: &mut Canvas,
    ) -> Result<TickOutcome, GameError> {
        if let Some(next) = self.ctx.queue.pop() {
            log::info!("Switch scene '{}' -> '{}'", self.active.name(), next.name());
            self.active = next;
        }

        if self.active.handle_inputs(events, &mut self.ctx)? == Dispatch::Quit {
            return Ok(TickOutcome::Quit);
        }
        self.active.update(dt_ms);
        self.active.render(canvas);
        Ok(TickOutcome::Continue)
    }
}
