// src/events/types.rs
//
// All events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Feed, MovieId, Theme};

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// FEED EVENTS
// ============================================================================

/// Emitted when a list request is issued for a feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedLoadStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub feed: Feed,
    pub page: u32,
    pub generation: u64,
}

impl FeedLoadStarted {
    pub fn new(feed: Feed, page: u32, generation: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            feed,
            page,
            generation,
        }
    }
}

impl DomainEvent for FeedLoadStarted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FeedLoadStarted" }
}

/// Emitted when a page has been merged into a feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub feed: Feed,
    pub page: u32,
    pub total_pages: u32,
    pub received: usize,
    pub accumulated: usize,
}

impl FeedLoaded {
    pub fn new(feed: Feed, page: u32, total_pages: u32, received: usize, accumulated: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            feed,
            page,
            total_pages,
            received,
            accumulated,
        }
    }
}

impl DomainEvent for FeedLoaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FeedLoaded" }
}

/// Emitted when a feed request failed; the feed kept its previous items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedLoadFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub feed: Feed,
    pub page: u32,
    pub message: String,
}

impl FeedLoadFailed {
    pub fn new(feed: Feed, page: u32, message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            feed,
            page,
            message,
        }
    }
}

impl DomainEvent for FeedLoadFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FeedLoadFailed" }
}

/// Emitted when a response arrived for a request that is no longer current
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleResponseDiscarded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub feed: Feed,
    pub page: u32,
    pub generation: u64,
    pub current_generation: u64,
}

impl StaleResponseDiscarded {
    pub fn new(feed: Feed, page: u32, generation: u64, current_generation: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            feed,
            page,
            generation,
            current_generation,
        }
    }
}

impl DomainEvent for StaleResponseDiscarded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "StaleResponseDiscarded" }
}

/// Emitted when a blank query reset the search feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl SearchCleared {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for SearchCleared {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEvent for SearchCleared {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SearchCleared" }
}

// ============================================================================
// FAVORITES EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub title: String,
}

impl FavoriteAdded {
    pub fn new(movie_id: MovieId, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

impl DomainEvent for FavoriteAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoriteAdded" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
}

impl FavoriteRemoved {
    pub fn new(movie_id: MovieId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

impl DomainEvent for FavoriteRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoriteRemoved" }
}

// ============================================================================
// PREFERENCE & SESSION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub theme: Theme,
}

impl ThemeChanged {
    pub fn new(theme: Theme) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            theme,
        }
    }
}

impl DomainEvent for ThemeChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ThemeChanged" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedIn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub username: String,
}

impl UserLoggedIn {
    pub fn new(username: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            username,
        }
    }
}

impl DomainEvent for UserLoggedIn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserLoggedIn" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedOut {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub username: String,
}

impl UserLoggedOut {
    pub fn new(username: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            username,
        }
    }
}

impl DomainEvent for UserLoggedOut {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserLoggedOut" }
}
