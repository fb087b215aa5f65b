// src/lib.rs
// Movie Explorer - trending, search, details and favorites over TMDB
//
// Architecture:
// - Domain-centric: movie records, pages, favorites and their invariants
// - Event-driven: services announce state changes on the event bus
// - Explicit: state is built once by the entry point and passed down
// - Local-first: favorites, last search, theme and session live in SQLite
// - Application Layer: the boundary the view layer talks to

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_movie_summary,
    validate_result_page,
    validate_search_filters,
    CastMember,
    FavoritesSet,
    Feed,
    Genre,
    MovieDetail,
    MovieId,
    MovieSummary,
    ResultPage,
    SearchFilters,
    SortOrder,
    Theme,
    User,
    Video,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    FavoriteAdded,
    FavoriteRemoved,
    FeedLoadFailed,
    FeedLoadStarted,
    FeedLoaded,
    SearchCleared,
    StaleResponseDiscarded,
    ThemeChanged,
    UserLoggedIn,
    UserLoggedOut,
};

// ============================================================================
// PUBLIC API - Database & Persistence Adapter
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

pub use repositories::{storage_keys, InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore};

// ============================================================================
// PUBLIC API - Gateway
// ============================================================================

pub use integrations::{ImageUrls, MovieGateway, TmdbClient, UnavailableGateway};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AuthService,
    CollectionSnapshot,
    FeedOutcome,
    FeedSnapshot,
    FeedStatus,
    MovieCollectionStore,
    ThemeService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use config::AppConfig;
