//! Debug overlay rendered via egui on top of the presented canvas.
//!
//! egui needs its draw split in phases because `egui_wgpu::Renderer::render()`
//! takes a `RenderPass<'static>` while buffer updates borrow the encoder:
//!
//!   1. `prepare()` runs the UI and tessellates
//!   2. `upload()` pushes textures and buffers through the encoder
//!   3. `paint()` draws into a pass detached with `forget_lifetime()`
//!   4. `cleanup()` frees textures egui dropped
//!
//! The window is only built while `visible` (F3), but window events always
//! reach egui so it can keep its input state consistent.

use hop_core::time::FrameClock;
use winit::window::Window;

/// Game-side values shown in the overlay, collected by the app each frame.
#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub scene: String,
    pub locale: String,
    /// `None` outside the level.
    pub player: Option<PlayerStats>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    pub state: String,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub available_jumps: u32,
}

/// Text lines of the overlay, one per label.
pub fn overlay_lines(clock: &FrameClock, stats: &OverlayStats) -> Vec<String> {
    let mut lines = vec![
        format!("FPS: {:.1} (target {})", clock.smoothed_fps, clock.target_fps),
        format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms),
        format!("Last dt: {} ms", clock.last_dt_ms),
        format!("Frame: {}", clock.frame_count),
        format!("Scene: {}", stats.scene),
        format!("Locale: {}", stats.locale),
    ];
    if let Some(player) = &stats.player {
        lines.push(format!("Player: {}", player.state));
        lines.push(format!(
            "Position: ({:.1}, {:.1})",
            player.position[0], player.position[1]
        ));
        lines.push(format!(
            "Velocity: ({:.1}, {:.1})",
            player.velocity[0], player.velocity[1]
        ));
        lines.push(format!("Jumps left: {}", player.available_jumps));
    }
    lines
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        self.egui_winit_state.on_window_event(window, event).consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        clock: &FrameClock,
        stats: &OverlayStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let visible = self.visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !visible {
                return;
            }
            egui::Window::new("Debug")
                .default_pos([10.0, 10.0])
                .resizable(false)
                .show(ctx, |ui| {
                    for line in overlay_lines(clock, stats) {
                        ui.label(line);
                    }
                });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Draws on top of whatever `view` holds; the presented canvas is kept.
    pub fn paint(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Debug Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.egui_renderer
            .render(&mut render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_without_player_stop_at_locale() {
        let clock = FrameClock::new(60);
        let stats = OverlayStats {
            scene: "menu".into(),
            locale: "fr".into(),
            player: None,
        };
        let lines = overlay_lines(&clock, &stats);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "FPS: 60.0 (target 60)");
        assert_eq!(lines[4], "Scene: menu");
        assert_eq!(lines[5], "Locale: fr");
    }

    #[test]
    fn level_stats_add_player_lines() {
        let clock = FrameClock::new(30);
        let stats = OverlayStats {
            scene: "level".into(),
            locale: "en".into(),
            player: Some(PlayerStats {
                state: "jump".into(),
                position: [10.0, 20.5],
                velocity: [0.0, -1100.0],
                available_jumps: 1,
            }),
        };
        let lines = overlay_lines(&clock, &stats);
        assert_eq!(lines.len(), 10);
        assert!(lines.contains(&"Player: jump".to_string()));
        assert!(lines.contains(&"Velocity: (0.0, -1100.0)".to_string()));
        assert!(lines.contains(&"Jumps left: 1".to_string()));
    }
}
