//! Title screen with the translated menu entries.

use hop_core::{Dispatch, EventSource, InputHandler, Key, KeyEvent, SelectionViewModel};
use hop_render::canvas::{BLACK, RED, WHITE};
use hop_render::{Canvas, Rect};
use image::RgbaImage;

use crate::assets::SoundHandle;
use crate::error::GameError;
use crate::scene::{Scene, SceneContext};
use crate::scenes::{cursor_outline, LevelScene};
use crate::settings::GAME_NAME;

const BANNER_SIZE: f32 = 100.0;
const ITEM_SIZE: f32 = 50.0;

pub struct MenuModel {
    selection: SelectionViewModel<String>,
    click: SoundHandle,
}

impl MenuModel {
    pub fn selection(&self) -> &SelectionViewModel<String> {
        &self.selection
    }
}

fn previous_item(
    model: &mut MenuModel,
    ctx: &mut SceneContext,
    _: &KeyEvent,
) -> Result<(), GameError> {
    model.selection.decrement_cursor_pos();
    if let Some(audio) = &ctx.audio {
        audio.play(&model.click);
    }
    Ok(())
}

fn next_item(model: &mut MenuModel, ctx: &mut SceneContext, _: &KeyEvent) -> Result<(), GameError> {
    model.selection.increment_cursor_pos();
    if let Some(audio) = &ctx.audio {
        audio.play(&model.click);
    }
    Ok(())
}

fn select_item(_: &mut MenuModel, ctx: &mut SceneContext, _: &KeyEvent) -> Result<(), GameError> {
    let level = LevelScene::new(ctx)?;
    ctx.queue.push(Box::new(level));
    Ok(())
}

pub(crate) fn input_handler() -> InputHandler<MenuModel, SceneContext, GameError> {
    InputHandler::new()
        .on_key_down(Key::Up, previous_item)
        .on_key_down(Key::Down, next_item)
        .on_key_down(Key::Enter, select_item)
        .on_key_down(Key::KpEnter, select_item)
}

/// Centers `count` items of `item_height` around `center_y`, one and a half
/// item heights apart.
fn stack_centers(count: usize, item_height: u32, center_y: i32) -> Vec<i32> {
    let step = item_height as f32 * 1.5;
    let middle = (count as f32 - 1.0) / 2.0;
    (0..count)
        .map(|i| center_y + ((i as f32 - middle) * step).round() as i32)
        .collect()
}

pub struct MenuScene {
    model: MenuModel,
    handler: InputHandler<MenuModel, SceneContext, GameError>,
    banner: (RgbaImage, Rect),
    items: Vec<(RgbaImage, Rect)>,
    canvas_width: u32,
}

impl MenuScene {
    pub fn new(ctx: &mut SceneContext) -> Result<Self, GameError> {
        let (width, height) = (ctx.settings.canvas_width, ctx.settings.canvas_height);
        let labels = vec![ctx.i18n.translate("new_game")];

        let banner_font = ctx.assets.load_font(&ctx.settings.font, BANNER_SIZE)?;
        let banner = banner_font.render(GAME_NAME, RED);
        let banner_rect = Rect::new(
            (width as i32 - banner.width() as i32) / 2,
            (height / 8) as i32,
            banner.width(),
            banner.height(),
        );

        let item_font = ctx.assets.load_font(&ctx.settings.font, ITEM_SIZE)?;
        let images: Vec<_> = labels
            .iter()
            .map(|label| item_font.render(label, WHITE))
            .collect();
        let line_height = images.iter().map(RgbaImage::height).max().unwrap_or(0);
        let centers = stack_centers(images.len(), line_height, (height / 2) as i32);
        let items = images
            .into_iter()
            .zip(centers)
            .map(|(image, cy)| {
                let rect = Rect::new(0, 0, image.width(), image.height())
                    .with_center((width / 2) as i32, cy);
                (image, rect)
            })
            .collect();

        let click = ctx.assets.load_sound(&ctx.settings.click_sound)?;

        Ok(Self {
            model: MenuModel {
                selection: SelectionViewModel::new(labels, 0)?,
                click,
            },
            handler: input_handler(),
            banner: (banner, banner_rect),
            items,
            canvas_width: width,
        })
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn handle_inputs(
        &mut self,
        events: &mut dyn EventSource,
        ctx: &mut SceneContext,
    ) -> Result<Dispatch, GameError> {
        self.handler.handle_inputs(events, &mut self.model, ctx)
    }

    fn update(&mut self, _dt_ms: u64) {}

    fn render(&self, canvas: &mut Canvas) {
        canvas.fill(BLACK);
        let (banner, rect) = &self.banner;
        canvas.blit(banner, rect.x, rect.y);
        for (image, rect) in &self.items {
            canvas.blit(image, rect.x, rect.y);
        }
        let (_, selected) = &self.items[self.model.selection.cursor_pos()];
        let (outline, line_width) = cursor_outline(*selected, self.canvas_width);
        canvas.draw_rect(outline, RED, line_width);
    }
}
