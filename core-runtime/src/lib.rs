//! # Core Runtime Module
//!
//! Ambient runtime infrastructure for the walking tour bridge:
//! - Configuration and capability injection
//! - Logging and tracing setup
//! - Shared runtime error type
//!
//! The bridge core (`core-bridge`) consumes a [`config::BridgeConfig`] built
//! here; hosts call [`logging::init_logging`] once at startup.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
