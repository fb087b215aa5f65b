// src/application/commands/favorite_commands.rs
//
// Favorites Command Handlers

use serde::{Deserialize, Serialize};

use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::{dto::*, state::AppState};
use crate::domain::{validate_movie_summary, MovieId, MovieSummary};

/// Movie as the view holds it when the heart is clicked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteMovieDto {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

fn toggle_result(state: &AppState, id: MovieId, is_favorite: bool) -> FavoriteToggleDto {
    FavoriteToggleDto {
        id,
        is_favorite,
        favorite_count: state.collection_store.favorite_count(),
    }
}

/// Flip favorite membership for the given movie
pub async fn toggle_favorite(
    state: &AppState,
    dto: FavoriteMovieDto,
) -> Result<FavoriteToggleDto, String> {
    let movie = MovieSummary {
        id: dto.id,
        title: dto.title,
        poster_path: dto.poster_path,
        release_date: dto.release_date,
        vote_average: dto.vote_average,
    };
    validate_movie_summary(&movie)
        .map_err(|e| ErrorResponse::validation(e.to_string()).into_json())?;

    let id = movie.id;
    let is_favorite = state.collection_store.toggle_favorite(movie);
    Ok(toggle_result(state, id, is_favorite))
}

/// Flip favorite membership knowing only the id.
/// Removing needs no network; adding fetches the movie first.
pub async fn toggle_favorite_by_id(
    state: &AppState,
    id: MovieId,
) -> Result<FavoriteToggleDto, String> {
    if state.collection_store.remove_favorite(id).is_some() {
        return Ok(toggle_result(state, id, false));
    }

    let detail = state
        .collection_store
        .load_movie_detail(id)
        .await
        .to_error_response()?;

    let is_favorite = state.collection_store.toggle_favorite(detail.summary);
    Ok(toggle_result(state, id, is_favorite))
}

pub async fn list_favorites(state: &AppState) -> Result<Vec<MovieSummaryDto>, String> {
    Ok(state
        .collection_store
        .favorites()
        .iter()
        .map(|m| MovieSummaryDto::from_summary(m, &state.images))
        .collect())
}

pub async fn is_favorite(state: &AppState, id: MovieId) -> Result<bool, String> {
    Ok(state.collection_store.is_favorite(id))
}
