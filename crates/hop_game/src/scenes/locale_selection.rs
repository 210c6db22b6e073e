//! First screen: one flag per configured locale, picked with Left/Right.

use std::sync::Arc;

use hop_core::{Dispatch, EventSource, InputHandler, Key, KeyEvent, SelectionViewModel};
use hop_render::canvas::{BLACK, RED};
use hop_render::{Canvas, Rect};
use image::RgbaImage;

use crate::assets::SoundHandle;
use crate::error::GameError;
use crate::scene::{Scene, SceneContext};
use crate::scenes::{cursor_outline, MenuScene};

pub struct LocaleSelectionModel {
    selection: SelectionViewModel<String>,
    click: SoundHandle,
}

impl LocaleSelectionModel {
    pub fn selection(&self) -> &SelectionViewModel<String> {
        &self.selection
    }
}

fn decrement_cursor(
    model: &mut LocaleSelectionModel,
    ctx: &mut SceneContext,
    _: &KeyEvent,
) -> Result<(), GameError> {
    model.selection.decrement_cursor_pos();
    play_click(model, ctx);
    Ok(())
}

fn increment_cursor(
    model: &mut LocaleSelectionModel,
    ctx: &mut SceneContext,
    _: &KeyEvent,
) -> Result<(), GameError> {
    model.selection.increment_cursor_pos();
    play_click(model, ctx);
    Ok(())
}

fn select_locale(
    model: &mut LocaleSelectionModel,
    ctx: &mut SceneContext,
    _: &KeyEvent,
) -> Result<(), GameError> {
    ctx.i18n.set_locale(model.selection.selected())?;
    let menu = MenuScene::new(ctx)?;
    ctx.queue.push(Box::new(menu));
    Ok(())
}

fn play_click(model: &LocaleSelectionModel, ctx: &SceneContext) {
    if let Some(audio) = &ctx.audio {
        audio.play(&model.click);
    }
}

pub(crate) fn input_handler() -> InputHandler<LocaleSelectionModel, SceneContext, GameError> {
    InputHandler::new()
        .on_key_down(Key::Left, decrement_cursor)
        .on_key_down(Key::Right, increment_cursor)
        .on_key_down(Key::Enter, select_locale)
        .on_key_down(Key::KpEnter, select_locale)
}

/// Spreads `sizes` across `canvas_width` with equal gaps between flags and
/// at both edges, every flag vertically centered.
pub fn layout_flags(sizes: &[(u32, u32)], canvas_width: u32, canvas_height: u32) -> Vec<Rect> {
    let n = sizes.len() as i64;
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(width, height))| {
            let gap = (canvas_width as i64 - n * width as i64) / (n + 1);
            let i = i as i64;
            let left = gap * (i + 1) + width as i64 * i;
            let top = (canvas_height as i64 - height as i64) / 2;
            Rect::new(left as i32, top as i32, width, height)
        })
        .collect()
}

pub struct LocaleSelectionScene {
    model: LocaleSelectionModel,
    handler: InputHandler<LocaleSelectionModel, SceneContext, GameError>,
    flags: Vec<(Arc<RgbaImage>, Rect)>,
    canvas_width: u32,
}

impl LocaleSelectionScene {
    pub fn new(ctx: &mut SceneContext) -> Result<Self, GameError> {
        Self::with_cursor(ctx, 0)
    }

    pub fn with_cursor(ctx: &mut SceneContext, cursor_pos: isize) -> Result<Self, GameError> {
        let locales = ctx.settings.locales.clone();
        let images = locales
            .iter()
            .map(|locale| ctx.assets.load_image(&format!("flag_{locale}.png")))
            .collect::<Result<Vec<_>, _>>()?;
        let sizes: Vec<_> = images.iter().map(|image| image.dimensions()).collect();
        let rects = layout_flags(&sizes, ctx.settings.canvas_width, ctx.settings.canvas_height);
        let click = ctx.assets.load_sound(&ctx.settings.click_sound)?;

        Ok(Self {
            model: LocaleSelectionModel {
                selection: SelectionViewModel::new(locales, cursor_pos)?,
                click,
            },
            handler: input_handler(),
            flags: images.into_iter().zip(rects).collect(),
            canvas_width: ctx.settings.canvas_width,
        })
    }

    pub fn model(&self) -> &LocaleSelectionModel {
        &self.model
    }
}

impl Scene for LocaleSelectionScene {
    fn name(&self) -> &'static str {
        "locale_selection"
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
        for (image, rect) in &self.flags {
            canvas.blit(image, rect.x, rect.y);
        }
        let (_, selected) = self.flags[self.model.selection.cursor_pos()];
        let (outline, line_width) = cursor_outline(selected, self.canvas_width);
        canvas.draw_rect(outline, RED, line_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_context;
    use hop_core::InputEvent;
    use proptest::prelude::*;

    #[test]
    fn flags_are_evenly_spaced_and_centered() {
        let rects = layout_flags(&[(100, 60); 3], 1000, 600);
        // gap = (1000 - 300) / 4 = 175
        let lefts: Vec<_> = rects.iter().map(|r| r.x).collect();
        assert_eq!(lefts, vec![175, 450, 725]);
        assert!(rects.iter().all(|r| r.y == 270));
        assert_eq!(1000 - rects[2].right(), 175);
    }

    #[test]
    fn left_on_cursor_one_moves_to_zero() {
        let mut ctx = test_context();
        let mut scene = LocaleSelectionScene::with_cursor(&mut ctx, 1).expect("scene");
        assert_eq!(scene.model().selection().collection(), ["en", "fr", "de"]);

        let mut events = vec![InputEvent::key_down(Key::Left)];
        scene.handle_inputs(&mut events, &mut ctx).expect("input");
        assert_eq!(scene.model().selection().cursor_pos(), 0);
        assert!(ctx.queue.is_empty());
    }

    #[test]
    fn right_wraps_past_the_last_flag() {
        let mut ctx = test_context();
        let mut scene = LocaleSelectionScene::with_cursor(&mut ctx, 2).expect("scene");
        scene
            .handle_inputs(&mut vec![InputEvent::key_down(Key::Right)], &mut ctx)
            .expect("input");
        assert_eq!(scene.model().selection().cursor_pos(), 0);
    }

    #[test]
    fn enter_switches_locale_and_queues_one_menu() {
        let mut ctx = test_context();
        let mut scene = LocaleSelectionScene::with_cursor(&mut ctx, 1).expect("scene");

        let mut events = vec![InputEvent::key_down(Key::Enter), InputEvent::key_down(Key::Enter)];
        let dispatch = scene.handle_inputs(&mut events, &mut ctx).expect("input");
        assert!(matches!(dispatch, Dispatch::Handled(_)));
        assert_eq!(ctx.i18n.locale(), Some("fr"));
        assert_eq!(ctx.queue.len(), 1);
        assert_eq!(ctx.queue.pop().map(|s| s.name()), Some("menu"));
    }

    #[test]
    fn keypad_enter_selects_too() {
        let mut ctx = test_context();
        let mut scene = LocaleSelectionScene::new(&mut ctx).expect("scene");
        scene
            .handle_inputs(&mut vec![InputEvent::key_down(Key::KpEnter)], &mut ctx)
            .expect("input");
        assert_eq!(ctx.i18n.locale(), Some("en"));
        assert_eq!(ctx.queue.len(), 1);
    }

    #[test]
    fn key_up_does_not_move_the_cursor() {
        let mut ctx = test_context();
        let mut scene = LocaleSelectionScene::with_cursor(&mut ctx, 1).expect("scene");
        let dispatch = scene
            .handle_inputs(&mut vec![InputEvent::key_up(Key::Left)], &mut ctx)
            .expect("input");
        assert_eq!(dispatch, Dispatch::Idle);
        assert_eq!(scene.model().selection().cursor_pos(), 1);
    }

    #[test]
    fn missing_flag_fails_construction() {
        let mut ctx = test_context();
        ctx.settings.locales.push("xx".to_string());
        let err = LocaleSelectionScene::new(&mut ctx).err().expect("no flag_xx.png");
        assert!(err.to_string().contains("flag_xx.png"));
    }

    #[test]
    fn render_outlines_the_selected_flag() {
        let mut ctx = test_context();
        let scene = LocaleSelectionScene::with_cursor(&mut ctx, 2).expect("scene");
        let mut canvas = Canvas::new(ctx.settings.canvas_width, ctx.settings.canvas_height);
        scene.render(&mut canvas);

        let (_, selected) = scene.flags[2];
        let (outline, _) = cursor_outline(selected, ctx.settings.canvas_width);
        assert_eq!(canvas.pixel(outline.x, outline.y), Some(RED));
        let (_, other) = scene.flags[0];
        let (other_outline, _) = cursor_outline(other, ctx.settings.canvas_width);
        assert_eq!(canvas.pixel(other_outline.x, other_outline.y), Some(BLACK));
    }

    proptest! {
        #[test]
        fn flags_fit_in_order_without_overlap(
            n in 1usize..6,
            width in 1u32..300,
            height in 1u32..200,
        ) {
            let canvas = (1920, 1080);
            let rects = layout_flags(&vec![(width, height); n], canvas.0, canvas.1);
            prop_assume!(n as u32 * width <= canvas.0);
            prop_assert_eq!(rects.len(), n);
            prop_assert!(rects[0].left() >= 0);
            prop_assert!(rects[n - 1].right() <= canvas.0 as i32);
            for pair in rects.windows(2) {
                prop_assert!(pair[0].right() <= pair[1].left());
            }
        }
    }
}
