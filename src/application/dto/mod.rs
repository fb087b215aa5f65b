// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are view-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain records only (never TO)
// - Display formatting (years, labels, image URLs) happens here

use serde::{Deserialize, Serialize};

use crate::domain::{Genre, MovieDetail, MovieSummary, Theme, User};
use crate::integrations::tmdb::images::DEFAULT_POSTER_SIZE;
use crate::integrations::ImageUrls;
use crate::services::{CollectionSnapshot, FeedOutcome, FeedSnapshot, FeedStatus};

/// Cast members shown on the detail view
const TOP_CAST_LIMIT: usize = 10;

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummaryDto {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
    pub vote_average: Option<f64>,
    pub rating_label: String,
}

impl MovieSummaryDto {
    pub fn from_summary(movie: &MovieSummary, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: images.poster(movie.poster_path.as_deref(), DEFAULT_POSTER_SIZE),
            release_date: movie.release_date.clone(),
            release_year: movie.release_year(),
            vote_average: movie.vote_average,
            rating_label: movie.rating_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMemberDto {
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailDto {
    #[serde(flatten)]
    pub summary: MovieSummaryDto,
    pub overview: String,
    pub tagline: Option<String>,
    pub runtime_label: Option<String>,
    pub genres: Vec<String>,
    pub cast: Vec<CastMemberDto>,
    pub trailer_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub vote_count: Option<u64>,
    pub is_favorite: bool,
}

impl MovieDetailDto {
    pub fn from_detail(detail: &MovieDetail, images: &ImageUrls, is_favorite: bool) -> Self {
        Self {
            summary: MovieSummaryDto::from_summary(&detail.summary, images),
            overview: detail.overview.clone(),
            tagline: detail.tagline.clone(),
            runtime_label: detail.runtime_label(),
            genres: detail.genres.iter().map(|g| g.name.clone()).collect(),
            cast: detail
                .top_cast(TOP_CAST_LIMIT)
                .iter()
                .map(|c| CastMemberDto {
                    name: c.name.clone(),
                    character: c.character.clone(),
                    profile_url: images.profile(c.profile_path.as_deref()),
                })
                .collect(),
            trailer_url: detail.trailer().and_then(|v| v.watch_url()),
            backdrop_url: images.backdrop(detail.backdrop_path.as_deref()),
            vote_count: detail.vote_count,
            is_favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: i64,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

// ============================================================================
// FEED & SNAPSHOT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDto {
    pub items: Vec<MovieSummaryDto>,
    pub page_number: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub status: FeedStatus,
}

impl FeedDto {
    pub fn from_snapshot(feed: &FeedSnapshot, images: &ImageUrls) -> Self {
        Self {
            items: feed
                .items
                .iter()
                .map(|m| MovieSummaryDto::from_summary(m, images))
                .collect(),
            page_number: feed.page_number,
            total_pages: feed.total_pages,
            has_more: feed.has_more,
            status: feed.status,
        }
    }
}

/// A list command's result: what happened plus the feed afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResultDto {
    /// "loaded", "failed", "skipped" or "discarded"
    pub outcome: String,
    pub error: Option<String>,
    pub feed: FeedDto,
}

impl FeedResultDto {
    pub fn new(outcome: FeedOutcome, snapshot: &CollectionSnapshot, feed: &FeedSnapshot, images: &ImageUrls) -> Self {
        let outcome = match outcome {
            FeedOutcome::Loaded { .. } => "loaded",
            FeedOutcome::Failed => "failed",
            FeedOutcome::Skipped => "skipped",
            FeedOutcome::Discarded => "discarded",
        };

        Self {
            outcome: outcome.to_string(),
            error: snapshot.error.clone(),
            feed: FeedDto::from_snapshot(feed, images),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDto {
    pub trending: FeedDto,
    pub search: FeedDto,
    pub favorites: Vec<MovieSummaryDto>,
    pub current_query: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl SnapshotDto {
    pub fn from_snapshot(snapshot: &CollectionSnapshot, images: &ImageUrls) -> Self {
        Self {
            trending: FeedDto::from_snapshot(&snapshot.trending, images),
            search: FeedDto::from_snapshot(&snapshot.search, images),
            favorites: snapshot
                .favorites
                .iter()
                .map(|m| MovieSummaryDto::from_summary(m, images))
                .collect(),
            current_query: snapshot.current_query.clone(),
            loading: snapshot.loading,
            error: snapshot.error.clone(),
        }
    }
}

// ============================================================================
// FAVORITES DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleDto {
    pub id: i64,
    pub is_favorite: bool,
    pub favorite_count: usize,
}

// ============================================================================
// PREFERENCE & SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeDto {
    pub theme: String,
}

impl From<Theme> for ThemeDto {
    fn from(theme: Theme) -> Self {
        Self {
            theme: theme.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub authenticated: bool,
    pub username: Option<String>,
    pub logged_in_at: Option<String>,
}

impl From<Option<User>> for SessionDto {
    fn from(user: Option<User>) -> Self {
        match user {
            Some(user) => Self {
                authenticated: true,
                username: Some(user.username),
                logged_in_at: Some(user.logged_in_at.to_rfc3339()),
            },
            None => Self {
                authenticated: false,
                username: None,
                logged_in_at: None,
            },
        }
    }
}
