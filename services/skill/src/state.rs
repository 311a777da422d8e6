//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! read-only resources: the transit API client, the station directory, and
//! the loaded configuration.

use crate::config::Config;
use headway_core::directory::StationDirectory;
use headway_core::transit::TransitApi;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub transit: Arc<dyn TransitApi>,
    pub directory: Arc<StationDirectory>,
    pub config: Arc<Config>,
}
