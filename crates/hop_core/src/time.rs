use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Frame-rate limiter. `tick()` sleeps until the frame budget is spent and
/// returns the elapsed wall-clock milliseconds since the previous tick.
pub struct FrameClock {
    pub target_fps: u32,
    pub max_dt_ms: u64,
    pub frame_count: u64,
    pub last_dt_ms: u64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let nominal_dt = if target_fps > 0 {
            1.0 / target_fps as f64
        } else {
            1.0 / 60.0
        };
        Self {
            target_fps,
            max_dt_ms: 250,
            frame_count: 0,
            last_dt_ms: 0,
            last_instant: Instant::now(),
            fps_samples: [nominal_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / nominal_dt,
            smoothed_frame_time_ms: nominal_dt * 1000.0,
        }
    }

    /// Minimum wall-clock time of one frame. Zero means "uncapped".
    pub fn frame_budget(&self) -> Duration {
        if self.target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / self.target_fps
        }
    }

    pub fn tick(&mut self) -> u64 {
        let budget = self.frame_budget();
        let spent = self.last_instant.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant);
        self.last_instant = now;
        self.record(dt)
    }

    fn record(&mut self, dt: Duration) -> u64 {
        let mut dt_ms = dt.as_millis() as u64;
        // A stalled frame (window drag, breakpoint) must not teleport the player.
        if dt_ms > self.max_dt_ms {
            log::warn!(
                "Frame took {}ms, capping dt to {}ms",
                dt_ms,
                self.max_dt_ms
            );
            dt_ms = self.max_dt_ms;
        }
        self.last_dt_ms = dt_ms;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = dt.as_secs_f64();
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        dt_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}
