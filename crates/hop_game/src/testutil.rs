//! Fixtures shared by the game crate's unit tests.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use hop_core::{Dispatch, EventSource, InputEvent, Key, KeyEventKind};
use hop_render::Canvas;

use crate::error::GameError;
use crate::scene::{Scene, SceneContext};
use crate::settings::Settings;

pub fn assets_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets"))
}

pub fn temp_dir_path(name_hint: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "hop_game_test_{}_{}_{}",
        name_hint,
        std::process::id(),
        nanos
    ))
}

pub fn test_settings() -> Settings {
    Settings {
        assets_dir: assets_dir(),
        ..Settings::default()
    }
}

/// Real assets, no audio device.
pub fn test_context() -> SceneContext {
    SceneContext::new(test_settings(), None)
}

#[derive(Clone, Default)]
pub struct SceneLog(Rc<RefCell<Vec<String>>>);

impl SceneLog {
    pub fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Records every call it receives. Enter queues a scene named "next" that
/// shares the same log.
pub struct NamedScene {
    name: &'static str,
    log: SceneLog,
}

impl NamedScene {
    pub fn new(name: &'static str) -> Self {
        Self::with_log(name, SceneLog::default())
    }

    pub fn with_log(name: &'static str, log: SceneLog) -> Self {
        Self { name, log }
    }
}

impl Scene for NamedScene {
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle_inputs(
        &mut self,
        events: &mut dyn EventSource,
        ctx: &mut SceneContext,
    ) -> Result<Dispatch, GameError> {
        self.log.push(format!("{}:input", self.name));
        for event in events.poll_events() {
            match event {
                InputEvent::Quit => return Ok(Dispatch::Quit),
                InputEvent::Key(key_event)
                    if key_event.kind == KeyEventKind::KeyDown && key_event.key == Key::Enter =>
                {
                    self.log.push(format!("{}:queue", self.name));
                    ctx.queue
                        .push(Box::new(NamedScene::with_log("next", self.log.clone())));
                    return Ok(Dispatch::Handled(key_event));
                }
                InputEvent::Key(_) => {}
            }
        }
        Ok(Dispatch::Idle)
    }

    fn update(&mut self, dt_ms: u64) {
        self.log.push(format!("{}:update:{}", self.name, dt_ms));
    }

    fn render(&self, _canvas: &mut Canvas) {
        self.log.push(format!("{}:render", self.name));
    }
}
