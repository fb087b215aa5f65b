use super::entity::MovieSummary;
use crate::domain::{DomainError, DomainResult};

/// Validates all MovieSummary invariants
pub fn validate_movie_summary(movie: &MovieSummary) -> DomainResult<()> {
    if movie.id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Movie id must be positive, got {}",
            movie.id
        )));
    }

    if movie.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }

    Ok(())
}
