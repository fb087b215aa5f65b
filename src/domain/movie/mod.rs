//! Movie Invariants:
//!
//! 1. A movie is identified by its provider id, which is stable and positive
//! 2. A movie always has a displayable title
//! 3. Summaries are immutable once received; a refetch replaces them wholesale
//! 4. Details are never cached, each detail view fetches afresh

pub mod entity;
pub mod invariants;

pub use entity::{CastMember, Genre, MovieDetail, MovieId, MovieSummary, Video};
pub use invariants::validate_movie_summary;
