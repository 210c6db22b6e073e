//! Key events and per-scene callback dispatch.
//!
//! The platform layer pushes translated events into an [`EventQueue`]; once per
//! frame the active scene drains it through its [`InputHandler`]. Dispatch is
//! deliberately "first match wins": as soon as one event of the drained batch
//! has a registered callback, that callback runs and the rest of the batch is
//! dropped. A quit event short-circuits everything else.

use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    KpEnter,
    Escape,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(KeyEvent),
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        Self::Key(KeyEvent {
            kind: KeyEventKind::KeyDown,
            key,
        })
    }

    pub fn key_up(key: Key) -> Self {
        Self::Key(KeyEvent {
            kind: KeyEventKind::KeyUp,
            key,
        })
    }
}

/// Anything that can hand over the events captured since the last poll.
pub trait EventSource {
    /// Drains every pending event, oldest first.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

impl EventSource for Vec<InputEvent> {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(self)
    }
}

/// FIFO filled by the windowing layer between two frames.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }
}

/// Result of one `handle_inputs` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No event had a registered callback.
    Idle,
    /// The callback for this event ran; later events of the batch were dropped.
    Handled(KeyEvent),
    /// The player closed the window.
    Quit,
}

/// Callback invoked with the scene model `T`, the shared context `C` and the
/// triggering event.
pub type Callback<T, C, E> = fn(&mut T, &mut C, &KeyEvent) -> Result<(), E>;

pub struct InputHandler<T, C, E> {
    key_down: HashMap<Key, Callback<T, C, E>>,
    key_up: HashMap<Key, Callback<T, C, E>>,
}

impl<T, C, E> InputHandler<T, C, E> {
    pub fn new() -> Self {
        Self {
            key_down: HashMap::new(),
            key_up: HashMap::new(),
        }
    }

    pub fn on_key_down(mut self, key: Key, callback: Callback<T, C, E>) -> Self {
        self.key_down.insert(key, callback);
        self
    }

    pub fn on_key_up(mut self, key: Key, callback: Callback<T, C, E>) -> Self {
        self.key_up.insert(key, callback);
        self
    }

    pub fn callback(&self, event: &KeyEvent) -> Option<Callback<T, C, E>> {
        let table = match event.kind {
            KeyEventKind::KeyDown => &self.key_down,
            KeyEventKind::KeyUp => &self.key_up,
        };
        table.get(&event.key).copied()
    }

    /// Drains `source` once and dispatches at most one event.
    pub fn handle_inputs(
        &self,
        source: &mut dyn EventSource,
        target: &mut T,
        ctx: &mut C,
    ) -> Result<Dispatch, E> {
        for event in source.poll_events() {
            match event {
                InputEvent::Quit => {
                    log::info!("Quit requested");
                    return Ok(Dispatch::Quit);
                }
                InputEvent::Key(key_event) => {
                    if let Some(callback) = self.callback(&key_event) {
                        log::trace!("Dispatching {:?}", key_event);
                        callback(target, ctx, &key_event)?;
                        return Ok(Dispatch::Handled(key_event));
                    }
                }
            }
        }
        Ok(Dispatch::Idle)
    }
}

impl<T, C, E> Default for InputHandler<T, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: i32,
    }

    type Log = Vec<&'static str>;

    fn up(counter: &mut Counter, log: &mut Log, _: &KeyEvent) -> Result<(), String> {
        counter.value += 1;
        log.push("up");
        Ok(())
    }

    fn down(counter: &mut Counter, log: &mut Log, _: &KeyEvent) -> Result<(), String> {
        counter.value -= 1;
        log.push("down");
        Ok(())
    }

    fn fail(_: &mut Counter, _: &mut Log, event: &KeyEvent) -> Result<(), String> {
        Err(format!("failed on {:?}", event.key))
    }

    fn handler() -> InputHandler<Counter, Log, String> {
        InputHandler::new()
            .on_key_down(Key::Up, up)
            .on_key_down(Key::Down, down)
            .on_key_up(Key::Space, up)
    }

    #[test]
    fn dispatches_matching_key_down() {
        let mut events = vec![InputEvent::key_down(Key::Up)];
        let mut counter = Counter::default();
        let mut log = Log::new();
        let dispatch = handler()
            .handle_inputs(&mut events, &mut counter, &mut log)
            .unwrap();
        assert_eq!(
            dispatch,
            Dispatch::Handled(KeyEvent {
                kind: KeyEventKind::KeyDown,
                key: Key::Up,
            })
        );
        assert_eq!(counter.value, 1);
        assert_eq!(log, vec!["up"]);
    }

    #[test]
    fn key_up_uses_its_own_table() {
        let mut counter = Counter::default();
        let mut log = Log::new();
        let h = handler();

        let mut events = vec![InputEvent::key_up(Key::Up)];
        let dispatch = h.handle_inputs(&mut events, &mut counter, &mut log).unwrap();
        assert_eq!(dispatch, Dispatch::Idle);
        assert_eq!(counter.value, 0);

        let mut events = vec![InputEvent::key_up(Key::Space)];
        h.handle_inputs(&mut events, &mut counter, &mut log).unwrap();
        assert_eq!(counter.value, 1);
    }

    #[test]
    fn only_first_matching_event_is_dispatched() {
        let mut events = vec![
            InputEvent::key_down(Key::Left),
            InputEvent::key_down(Key::Up),
            InputEvent::key_down(Key::Down),
            InputEvent::key_down(Key::Up),
        ];
        let mut counter = Counter::default();
        let mut log = Log::new();
        handler()
            .handle_inputs(&mut events, &mut counter, &mut log)
            .unwrap();
        // Left has no callback and is skipped; Up runs; the rest is dropped.
        assert_eq!(log, vec!["up"]);
        assert_eq!(counter.value, 1);
        assert!(events.is_empty(), "the whole batch is drained");
    }

    #[test]
    fn quit_short_circuits_before_later_keys() {
        let mut events = vec![InputEvent::Quit, InputEvent::key_down(Key::Up)];
        let mut counter = Counter::default();
        let mut log = Log::new();
        let dispatch = handler()
            .handle_inputs(&mut events, &mut counter, &mut log)
            .unwrap();
        assert_eq!(dispatch, Dispatch::Quit);
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn unmatched_batch_is_idle() {
        let mut events = vec![InputEvent::key_down(Key::Escape), InputEvent::key_up(Key::Left)];
        let mut counter = Counter::default();
        let mut log = Log::new();
        let dispatch = handler()
            .handle_inputs(&mut events, &mut counter, &mut log)
            .unwrap();
        assert_eq!(dispatch, Dispatch::Idle);
        assert!(log.is_empty());
    }

    #[test]
    fn callback_error_propagates() {
        let h: InputHandler<Counter, Log, String> =
            InputHandler::new().on_key_down(Key::Enter, fail);
        let mut events = vec![InputEvent::key_down(Key::Enter)];
        let err = h
            .handle_inputs(&mut events, &mut Counter::default(), &mut Log::new())
            .expect_err("callback failed");
        assert!(err.contains("Enter"));
    }

    #[test]
    fn event_queue_drains_in_arrival_order() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::key_down(Key::Left));
        queue.push(InputEvent::key_up(Key::Left));
        queue.push(InputEvent::Quit);
        assert_eq!(queue.len(), 3);

        let drained = queue.poll_events();
        assert_eq!(
            drained,
            vec![
                InputEvent::key_down(Key::Left),
                InputEvent::key_up(Key::Left),
                InputEvent::Quit,
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.poll_events().is_empty());
    }
}
