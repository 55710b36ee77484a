//! Host-side cascade driver.
//!
//! Sits between a host loop and a [`GameSession`](candy_swap_core::GameSession):
//! the host calls [`Driver::tick`] every frame with the elapsed time, and the
//! driver runs cascade stages either immediately or on the animation schedule.

pub mod driver;

pub use candy_swap_core as core;
pub use candy_swap_types as types;

pub use driver::{stage_delay_ms, Driver, Pacing, Tick};
