// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod favorites;
pub mod feed;
pub mod filters;
pub mod movie;
pub mod page;
pub mod theme;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{
    validate_movie_summary, CastMember, Genre, MovieDetail, MovieId, MovieSummary, Video,
};

// Pagination
pub use page::{validate_result_page, ResultPage};

// Favorites
pub use favorites::FavoritesSet;

// Feeds
pub use feed::Feed;

// Search refinements
pub use filters::{validate_search_filters, SearchFilters, SortOrder};

// Preferences & Session
pub use theme::Theme;
pub use user::{validate_user, User};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
