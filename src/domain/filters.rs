// src/domain/filters.rs
//
// Search Filters
//
// Opaque to the collection store: carried from the caller to the gateway
// untouched. Only the gateway gives them meaning.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// How a page of search results is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Popularity,
    Rating,
    ReleaseDate,
    Title,
}

impl std::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortOrder::Popularity),
            "rating" => Ok(SortOrder::Rating),
            "release_date" => Ok(SortOrder::ReleaseDate),
            "title" => Ok(SortOrder::Title),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown sort order: {}",
                other
            ))),
        }
    }
}

/// Optional refinements applied to a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Genre id
    pub genre: Option<i64>,

    /// Primary release year
    pub year: Option<i32>,

    /// Minimum average rating (0-10)
    pub min_rating: Option<f64>,

    pub sort: Option<SortOrder>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.year.is_none() && self.min_rating.is_none() && self.sort.is_none()
    }
}

/// Validates SearchFilters invariants
pub fn validate_search_filters(filters: &SearchFilters) -> DomainResult<()> {
    if let Some(rating) = filters.min_rating {
        if !(0.0..=10.0).contains(&rating) {
            return Err(DomainError::InvariantViolation(format!(
                "Minimum rating {} is outside 0-10",
                rating
            )));
        }
    }
    Ok(())
}
