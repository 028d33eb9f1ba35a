pub mod drag;

pub use drag::{DragEvent, DragGesture};
