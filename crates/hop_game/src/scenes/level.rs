//! The playable level: a flat ground band between two walls.

use glam::Vec2;
use hop_core::{Dispatch, EventSource, InputHandler, Key, KeyEvent};
use hop_devtools::PlayerStats;
use hop_render::canvas::BLACK;
use hop_render::{Canvas, Color, Rect};

use crate::error::GameError;
use crate::player_sprite::PlayerSprite;
use crate::scene::{Scene, SceneContext};
use crate::scenes::MenuScene;

const GROUND: Color = [86, 62, 40, 255];
const GRASS: Color = [64, 160, 72, 255];
const GRASS_HEIGHT: u32 = 12;

pub struct LevelModel {
    player: PlayerSprite,
    width: f32,
    ground_top: f32,
}

impl LevelModel {
    pub fn player(&self) -> &PlayerSprite {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerSprite {
        &mut self.player
    }

    /// Advances the player by `dt_ms`: gravity, horizontal move clamped to
    /// the walls, vertical move, then ground and roof contact.
    pub fn step(&mut self, dt_ms: u64) {
        let size = self.player.size() as f32;
        let width = self.width;
        let ground_top = self.ground_top;
        let body = self.player.body_mut();

        body.apply_gravity(dt_ms);

        body.update_horizontal_pos(dt_ms);
        let mut position = body.position();
        position.x = position.x.clamp(0.0, (width - size).max(0.0));
        body.set_position(position);

        body.update_vertical_pos(dt_ms);
        let mut position = body.position();
        if position.y + size >= ground_top && body.velocity().y >= 0.0 {
            position.y = ground_top - size;
            body.set_position(position);
            body.hit_ground();
        } else if position.y <= 0.0 && body.velocity().y < 0.0 {
            position.y = 0.0;
            body.set_position(position);
            body.hit_roof();
        }

        self.player.update_animation(dt_ms);
    }
}

fn move_left(model: &mut LevelModel, _: &mut SceneContext, _: &KeyEvent) -> Result<(), GameError> {
    model.player.body_mut().move_left();
    Ok(())
}

fn move_right(model: &mut LevelModel, _: &mut SceneContext, _: &KeyEvent) -> Result<(), GameError> {
    model.player.body_mut().move_right();
    Ok(())
}

/// Releasing Left only stops a player still moving left, so a quick
/// Left-to-Right switch keeps running.
fn release_left(
    model: &mut LevelModel,
    _: &mut SceneContext,
    _: &KeyEvent,
) -> Result<(), GameError> {
    let body = model.player.body_mut();
    if body.velocity().x < 0.0 {
        body.stop_horizontal_movement();
    }
    Ok(())
}

fn release_right(
    model: &mut LevelModel,
    _: &mut SceneContext,
    _: &KeyEvent,
) -> Result<(), GameError> {
    let body = model.player.body_mut();
    if body.velocity().x > 0.0 {
        body.stop_horizontal_movement();
    }
    Ok(())
}

fn jump(model: &mut LevelModel, _: &mut SceneContext, _: &KeyEvent) -> Result<(), GameError> {
    model.player.body_mut().jump();
    Ok(())
}

fn back_to_menu(_: &mut LevelModel, ctx: &mut SceneContext, _: &KeyEvent) -> Result<(), GameError> {
    let menu = MenuScene::new(ctx)?;
    ctx.queue.push(Box::new(menu));
    Ok(())
}

pub(crate) fn input_handler() -> InputHandler<LevelModel, SceneContext, GameError> {
    InputHandler::new()
        .on_key_down(Key::Left, move_left)
        .on_key_down(Key::Right, move_right)
        .on_key_up(Key::Left, release_left)
        .on_key_up(Key::Right, release_right)
        .on_key_down(Key::Space, jump)
        .on_key_down(Key::Up, jump)
        .on_key_down(Key::Escape, back_to_menu)
}

pub struct LevelScene {
    model: LevelModel,
    handler: InputHandler<LevelModel, SceneContext, GameError>,
    ground: Rect,
}

impl LevelScene {
    /// The player starts standing on the ground in the middle of the level.
    pub fn new(ctx: &mut SceneContext) -> Result<Self, GameError> {
        let settings = &ctx.settings;
        let (width, height) = (settings.canvas_width, settings.canvas_height);
        let ground = Rect::new(
            0,
            (height - settings.ground_height) as i32,
            width,
            settings.ground_height,
        );

        let mut player = PlayerSprite::load(&mut ctx.assets, settings, Vec2::ZERO)?;
        let size = player.size() as f32;
        player.body_mut().set_position(Vec2::new(
            (width as f32 - size) / 2.0,
            ground.top() as f32 - size,
        ));

        Ok(Self {
            model: LevelModel {
                player,
                width: width as f32,
                ground_top: ground.top() as f32,
            },
            handler: input_handler(),
            ground,
        })
    }

    pub fn model(&self) -> &LevelModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut LevelModel {
        &mut self.model
    }
}

impl Scene for LevelScene {
    fn name(&self) -> &'static str {
        "level"
    }

    fn handle_inputs(
        &mut self,
        events: &mut dyn EventSource,
        ctx: &mut SceneContext,
    ) -> Result<Dispatch, GameError> {
        self.handler.handle_inputs(events, &mut self.model, ctx)
    }

    fn update(&mut self, dt_ms: u64) {
        self.model.step(dt_ms);
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.fill(BLACK);
        canvas.fill_rect(self.ground, GROUND);
        canvas.fill_rect(
            Rect::new(self.ground.x, self.ground.y, self.ground.width, GRASS_HEIGHT),
            GRASS,
        );
        let position = self.model.player.body().position();
        canvas.blit(
            self.model.player.frame(),
            position.x.round() as i32,
            position.y.round() as i32,
        );
    }

    fn player_stats(&self) -> Option<PlayerStats> {
        let body = self.model.player.body();
        Some(PlayerStats {
            state: body.state().label().to_string(),
            position: body.position().to_array(),
            velocity: body.velocity().to_array(),
            available_jumps: body.available_jumps(),
        })
    }
}
