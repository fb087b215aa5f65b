// src/application/commands/movie_commands.rs
//
// Feed, Search and Detail Command Handlers
//
// RULES:
// - Accept plain arguments or DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use serde::{Deserialize, Serialize};

use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::{dto::*, state::AppState};
use crate::domain::{validate_search_filters, MovieId, SearchFilters, SortOrder};
use crate::services::{CollectionSnapshot, FeedOutcome, FeedSnapshot};

/// Search form input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequestDto {
    pub query: String,
    pub genre: Option<i64>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    /// "popularity", "rating", "release_date" or "title"
    pub sort: Option<String>,
    pub page: Option<u32>,
}

fn feed_result(
    state: &AppState,
    outcome: FeedOutcome,
    pick: fn(&CollectionSnapshot) -> &FeedSnapshot,
) -> FeedResultDto {
    let snapshot = state.collection_store.snapshot();
    FeedResultDto::new(outcome, &snapshot, pick(&snapshot), &state.images)
}

/// Load a trending page (page 1 when omitted)
pub async fn load_trending(state: &AppState, page: Option<u32>) -> Result<FeedResultDto, String> {
    let outcome = state
        .collection_store
        .load_trending(page.unwrap_or(1))
        .await;
    Ok(feed_result(state, outcome, |s| &s.trending))
}

pub async fn load_more_trending(state: &AppState) -> Result<FeedResultDto, String> {
    let outcome = state.collection_store.load_more_trending().await;
    Ok(feed_result(state, outcome, |s| &s.trending))
}

/// Run a search. Filters are checked for shape only; their meaning is the gateway's.
pub async fn search_movies(
    state: &AppState,
    request: SearchRequestDto,
) -> Result<FeedResultDto, String> {
    let sort = request
        .sort
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()
        .map_err(|e| ErrorResponse::validation(e.to_string()).into_json())?;

    let filters = SearchFilters {
        genre: request.genre,
        year: request.year,
        min_rating: request.min_rating,
        sort,
    };
    validate_search_filters(&filters)
        .map_err(|e| ErrorResponse::validation(e.to_string()).into_json())?;

    let outcome = state
        .collection_store
        .search(&request.query, filters, request.page.unwrap_or(1))
        .await;
    Ok(feed_result(state, outcome, |s| &s.search))
}

pub async fn load_more_search(state: &AppState) -> Result<FeedResultDto, String> {
    let outcome = state.collection_store.load_more_search().await;
    Ok(feed_result(state, outcome, |s| &s.search))
}

/// Re-run the search saved from the previous session
pub async fn resume_last_search(state: &AppState) -> Result<FeedResultDto, String> {
    let outcome = state.collection_store.resume_last_search().await;
    Ok(feed_result(state, outcome, |s| &s.search))
}

pub async fn get_movie_detail(state: &AppState, id: MovieId) -> Result<MovieDetailDto, String> {
    let detail = state
        .collection_store
        .load_movie_detail(id)
        .await
        .to_error_response()?;

    let is_favorite = state.collection_store.is_favorite(detail.id());
    Ok(MovieDetailDto::from_detail(&detail, &state.images, is_favorite))
}

pub async fn list_genres(state: &AppState) -> Result<Vec<GenreDto>, String> {
    let genres = state
        .collection_store
        .load_genres()
        .await
        .to_error_response()?;

    Ok(genres.into_iter().map(GenreDto::from).collect())
}

pub async fn get_snapshot(state: &AppState) -> Result<SnapshotDto, String> {
    let snapshot = state.collection_store.snapshot();
    Ok(SnapshotDto::from_snapshot(&snapshot, &state.images))
}
