//! Core domain + application logic for the group help bot.
//!
//! This crate is intentionally framework-agnostic. The Telegram API lives
//! behind a port (trait) implemented in the adapter crate, so every handler
//! can be exercised against a fake client.

pub mod auth;
pub mod chat;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod handlers;
pub mod logging;
pub mod registry;
pub mod router;
pub mod rules;

pub use errors::{Error, Result};
