//! unitiles (workspace facade crate).
//!
//! Re-exports the member crates under one roof, `unitiles::{core, term, input, config, types}`,
//! and hosts what the bundled binaries share: logging setup and the demo dungeon.

pub mod demo;
pub mod logging;

pub use unitiles_config as config;
pub use unitiles_core as core;
pub use unitiles_input as input;
pub use unitiles_term as term;
pub use unitiles_types as types;
