// src/events/mod.rs
//
// Internal Event System - Public API
//
// Services emit after mutating state; the view layer subscribes to learn
// that a snapshot changed. Handler storage stays private to the bus.

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Favorites
    FavoriteAdded,
    FavoriteRemoved,
    // Feeds
    FeedLoadFailed,
    FeedLoadStarted,
    FeedLoaded,
    SearchCleared,
    StaleResponseDiscarded,
    // Preferences & session
    ThemeChanged,
    UserLoggedIn,
    UserLoggedOut,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
