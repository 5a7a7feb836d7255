//! Terminal presentation layer: framebuffer, renderer, and game view.
//!
//! Everything here consumes board snapshots; nothing reaches back into
//! the engine.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
