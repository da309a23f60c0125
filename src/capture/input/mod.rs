//! Pointer input boundary
//!
//! Defines the samples the engine consumes, the strokes it hands back to a
//! renderer, and a `PointerChannel` that host pointer callbacks feed.
//! Recorded mouse-move files can be loaded and replayed through the same path.

pub mod channel;
pub mod types;

pub use channel::{load_mouse_moves, PointerChannel};
pub use types::{MouseMove, PointerSample, RenderStroke};
