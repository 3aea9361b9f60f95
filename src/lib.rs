//! sbm, a simple bookmark manager.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod managers;
pub mod platform;
pub mod services;
pub mod storage;
pub mod types;
