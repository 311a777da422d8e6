//! Headway Skill Library Crate
//!
//! This library contains all the logic for the Headway voice-skill web
//! service: configuration, the voice-platform envelope models, the intent
//! dispatcher, HTTP handlers, and routing. The `skill` binary is a thin
//! wrapper around this library.

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
