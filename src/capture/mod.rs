//! Capture-side types and adapters
//!
//! The engine does not talk to any windowing system itself; hosts deliver
//! pointer events through the input module.

pub mod input;

// Re-export input boundary
pub use input::{load_mouse_moves, MouseMove, PointerChannel, PointerSample, RenderStroke};
