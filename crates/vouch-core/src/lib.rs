//! Shared infrastructure for the vouch workspace: configuration loading,
//! policy constants, and the core error type.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
