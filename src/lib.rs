//! Candy Swap (workspace facade crate).
//!
//! Re-exports the workspace crates under one name (`candy_swap::{core, engine,
//! input, term, types}`) and adds the pieces the terminal binary needs on top:
//! environment configuration, file logging and the [`Host`] glue.

pub mod config;
pub mod host;
pub mod logging;

pub use candy_swap_core as core;
pub use candy_swap_engine as engine;
pub use candy_swap_input as input;
pub use candy_swap_term as term;
pub use candy_swap_types as types;

pub use config::AppConfig;
pub use host::Host;
