//! Terminal input module (host-facing).
//!
//! Maps `crossterm` key events into [`HostAction`]s and keeps the board
//! cursor the player moves around with. Nothing here touches the rules; the
//! host turns actions into session calls.

pub mod cursor;
pub mod map;

pub use candy_swap_types as types;

pub use cursor::{BoardCursor, Direction};
pub use map::{handle_key_event, should_quit, HostAction};
