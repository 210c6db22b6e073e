pub mod canvas;
pub mod gpu_context;
pub mod presenter;

pub use canvas::{Canvas, Color, Rect};
pub use gpu_context::{GpuContext, GpuError};
pub use presenter::Presenter;
