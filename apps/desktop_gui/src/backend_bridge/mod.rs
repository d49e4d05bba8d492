//! Worker-thread bridge: UI commands in, store results out.

pub mod commands;
pub mod runtime;
