//! Core domain + application logic for the paranoia answer bot.
//!
//! This crate is intentionally platform-agnostic. Discord and the question
//! database live behind ports (traits) implemented in adapter crates.

pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod reveal;
pub mod store;

pub use errors::{Error, Result};
