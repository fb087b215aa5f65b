// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::integrations::ImageUrls;
use crate::services::{AuthService, MovieCollectionStore, ThemeService};

/// Session-wide application state.
/// Built once by the entry point and passed to every command.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub collection_store: Arc<MovieCollectionStore>,
    pub theme_service: Arc<ThemeService>,
    pub auth_service: Arc<AuthService>,
    pub images: ImageUrls,
}
