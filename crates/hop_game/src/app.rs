//! winit application: owns the window, the GPU side and the game loop.
//!
//! Every `RedrawRequested` is one frame:
//!
//!   1. `FrameClock::tick()` caps the frame rate and measures dt
//!   2. `GameLoop::tick()` swaps in a queued scene, then input, update, render
//!   3. the canvas is uploaded and letterboxed into the window
//!   4. the egui debug overlay is composited on top
//!
//! Window events between two frames are translated and queued; the active
//! scene drains them during step 2.

use std::sync::Arc;

use hop_core::{EventQueue, FrameClock, InputEvent, Key};
use hop_devtools::{DebugOverlay, OverlayStats};
use hop_platform::events::translate_window_event;
use hop_platform::window::{create_window, PlatformConfig};
use hop_render::{Canvas, GpuContext, Presenter};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::audio::Audio;
use crate::error::GameError;
use crate::game_loop::{GameLoop, TickOutcome};
use crate::scene::SceneContext;
use crate::scenes::LocaleSelectionScene;
use crate::settings::Settings;

struct AppState {
    window: Arc<Window>,
    gpu: GpuContext,
    presenter: Presenter,
    overlay: DebugOverlay,
    canvas: Canvas,
    clock: FrameClock,
    events: EventQueue,
    game: GameLoop,
}

impl AppState {
    fn new(event_loop: &ActiveEventLoop, settings: &Settings) -> Result<Self, GameError> {
        let config = PlatformConfig {
            title: settings.title.clone(),
            width: settings.window_width,
            height: settings.window_height,
            cursor_visible: false,
        };
        let window = create_window(event_loop, &config)?;
        log::info!("Window created: {}x{}", config.width, config.height);

        let gpu = GpuContext::new(window.clone())?;
        let canvas_size = (settings.canvas_width, settings.canvas_height);
        let presenter = Presenter::new(&gpu.device, gpu.surface_format, canvas_size);
        let overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let mut ctx = SceneContext::new(settings.clone(), Audio::try_new());
        let initial = LocaleSelectionScene::new(&mut ctx)?;
        let game = GameLoop::new(Box::new(initial), ctx);

        Ok(Self {
            window,
            gpu,
            presenter,
            overlay,
            canvas: Canvas::new(canvas_size.0, canvas_size.1),
            clock: FrameClock::new(settings.fps),
            events: EventQueue::new(),
            game,
        })
    }

    fn frame(&mut self) -> Result<TickOutcome, GameError> {
        let dt_ms = self.clock.tick();
        let outcome = self.game.tick(dt_ms, &mut self.events, &mut self.canvas)?;
        if outcome == TickOutcome::Continue {
            self.present();
        }
        Ok(outcome)
    }

    fn overlay_stats(&self) -> OverlayStats {
        let ctx = self.game.context();
        let scene = self.game.active_scene();
        OverlayStats {
            scene: scene.name().to_string(),
            locale: ctx.i18n.locale().unwrap_or("-").to_string(),
            player: scene.player_stats(),
        }
    }

    fn present(&mut self) {
        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.presenter.present(
            &self.gpu.queue,
            &mut encoder,
            &view,
            self.gpu.size,
            &self.canvas,
        );

        let stats = self.overlay_stats();
        let (primitives, textures_delta) = self.overlay.prepare(&self.window, &self.clock, &stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );
        self.overlay
            .paint(&mut encoder, &view, &primitives, &screen_descriptor);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.overlay.cleanup(&textures_delta);
    }
}

pub struct App {
    settings: Settings,
    state: Option<AppState>,
    error: Option<GameError>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<(), GameError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: GameError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match AppState::new(event_loop, &self.settings) {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::Resized(size) => {
                if state.gpu.resize(size.width, size.height) {
                    log::info!("Resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => match state.frame() {
                Ok(TickOutcome::Continue) => {}
                Ok(TickOutcome::Quit) => {
                    log::info!("Quit, exiting the event loop");
                    event_loop.exit();
                }
                Err(err) => self.fail(event_loop, err),
            },
            _ => match translate_window_event(&event) {
                Some(input) if input == InputEvent::key_down(Key::F3) => state.overlay.toggle(),
                Some(InputEvent::Key(_)) if egui_consumed => {}
                Some(input) => state.events.push(input),
                None => {}
            },
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop the surface before the window goes away.
        self.state = None;
    }
}
