//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! plain framebuffer, and the renderer flushes only what changed to the
//! terminal. No widget toolkit, no layout engine.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Two terminal columns per board cell so the grid looks square

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use candy_swap_core as core;
pub use candy_swap_types as types;

pub use board_view::{candy_color, candy_glyph, AnchorY, BoardRect, BoardView, Marks, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{frame_diff, full_frame, TerminalRenderer};
