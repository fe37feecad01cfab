//! follow-audit CLI library exports.
//!
//! The binary in `main.rs` is a thin dispatcher over these modules, which keeps
//! the command logic testable without spawning a process.

pub mod commands;
pub mod config;
pub mod errors;

#[cfg(test)]
mod test_support;
