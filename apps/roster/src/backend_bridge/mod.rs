//! Backend worker: owns the async runtime and the user source.

pub mod commands;
pub mod runtime;
