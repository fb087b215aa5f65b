// src/services/auth_service.rs
//
// Mock session
//
// A fixed credential list stands in for a real identity provider. This is
// not authentication: it only decides which username the session shows.
// Only {username, logged_in_at} is persisted under the `user` key.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{validate_user, User};
use crate::events::{EventBus, UserLoggedIn, UserLoggedOut};
use crate::repositories::{storage_keys, KeyValueStore};

const MOCK_CREDENTIALS: &[(&str, &str)] = &[("user", "password"), ("demo", "demo123")];

pub struct AuthService {
    storage: Arc<dyn KeyValueStore>,
    event_bus: Arc<EventBus>,
    current: RwLock<Option<User>>,
}

impl AuthService {
    pub fn new(storage: Arc<dyn KeyValueStore>, event_bus: Arc<EventBus>) -> Self {
        let current = hydrate_user(storage.as_ref());
        Self {
            storage,
            event_bus,
            current: RwLock::new(current),
        }
    }

    /// Returns whether the credentials matched. A failed attempt leaves any
    /// existing session untouched.
    pub fn login(&self, username: &str, password: &str) -> bool {
        let known = MOCK_CREDENTIALS
            .iter()
            .any(|(name, secret)| *name == username && *secret == password);

        if !known {
            log::info!("Rejected login for '{}'", username);
            return false;
        }

        let user = User::new(username);
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            match serde_json::to_string(&user) {
                Ok(json) => {
                    if let Err(e) = self.storage.set(storage_keys::USER, &json) {
                        log::warn!("Failed to persist session: {}", e);
                    }
                }
                Err(e) => log::warn!("Failed to serialize session: {}", e),
            }
            *current = Some(user);
        }

        log::info!("User '{}' logged in", username);
        self.event_bus.emit(UserLoggedIn::new(username.to_string()));
        true
    }

    pub fn logout(&self) {
        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = self.storage.remove(storage_keys::USER) {
                log::warn!("Failed to clear session: {}", e);
            }
            current.take()
        };

        if let Some(user) = previous {
            log::info!("User '{}' logged out", user.username);
            self.event_bus.emit(UserLoggedOut::new(user.username));
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

fn hydrate_user(storage: &dyn KeyValueStore) -> Option<User> {
    let raw = match storage.get(storage_keys::USER) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("Failed to read saved session: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) if validate_user(&user).is_ok() => Some(user),
        Ok(_) => {
            log::warn!("Ignoring saved session with an invalid user");
            None
        }
        Err(e) => {
            log::warn!("Ignoring corrupt saved session: {}", e);
            None
        }
    }
}
