//! Platform-free game logic: menu selection, input dispatch, frame timing,
//! sprite animation and player kinematics.

pub mod animation;
pub mod input;
pub mod player;
pub mod selection;
pub mod time;

pub use animation::{AnimationError, AnimationHandler, Direction, PlayerState};
pub use input::{
    Callback, Dispatch, EventQueue, EventSource, InputEvent, InputHandler, Key, KeyEvent,
    KeyEventKind,
};
pub use player::{PlayerBody, PlayerConfig};
pub use selection::{SelectionError, SelectionViewModel};
pub use time::FrameClock;
