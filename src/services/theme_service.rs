// src/services/theme_service.rs
//
// Light/dark preference, persisted as the plain string "light" or "dark"

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::AppearanceConfig;
use crate::domain::Theme;
use crate::events::{EventBus, ThemeChanged};
use crate::repositories::{storage_keys, KeyValueStore};

pub struct ThemeService {
    storage: Arc<dyn KeyValueStore>,
    event_bus: Arc<EventBus>,
    current: RwLock<Theme>,
}

impl ThemeService {
    /// The saved theme wins; otherwise the system preference decides
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        event_bus: Arc<EventBus>,
        appearance: &AppearanceConfig,
    ) -> Self {
        let fallback = if appearance.prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        };

        let initial = match storage.get(storage_keys::THEME) {
            Ok(Some(saved)) => Theme::parse(&saved).unwrap_or_else(|| {
                log::warn!("Ignoring unknown saved theme '{}'", saved);
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("Failed to read saved theme: {}", e);
                fallback
            }
        };

        Self {
            storage,
            event_bus,
            current: RwLock::new(initial),
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn set(&self, theme: Theme) {
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = theme;
            if let Err(e) = self.storage.set(storage_keys::THEME, theme.as_str()) {
                log::warn!("Failed to persist theme: {}", e);
            }
        }
        self.event_bus.emit(ThemeChanged::new(theme));
    }
}
