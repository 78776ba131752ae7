//! HubConf CLI library exports.
//!
//! The binary is a thin wrapper around these modules so that commands can be
//! exercised against a fake GitHub in tests.

pub mod commands;
pub mod config;
pub mod errors;
pub mod store;
pub mod terminal;
pub mod workspace;
