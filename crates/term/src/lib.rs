//! Terminal front end.
//!
//! [`GameView`] lays a snapshot out in a [`FrameBuffer`] (pure, testable) and
//! [`TerminalRenderer`] writes that buffer to the terminal. The renderer is the
//! engine's [`RenderSink`](stackfall_engine::RenderSink) in the interactive binary.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use stackfall_core as core;
pub use stackfall_engine as engine;
pub use stackfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
