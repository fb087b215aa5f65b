// src/integrations/tmdb/wire.rs
//
// TMDB payload shapes and their mapping into domain records.
//
// Every field the provider may omit is optional here; defaults are decided
// in the `into_*` functions so nothing untyped reaches the store.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::domain::{
    validate_movie_summary, CastMember, Genre, MovieDetail, MovieSummary, ResultPage,
    SearchFilters, SortOrder, Video,
};

const UNTITLED: &str = "Untitled";

#[derive(Debug, Deserialize)]
pub(crate) struct WirePage {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub results: Vec<WireMovie>,
    #[serde(default)]
    pub total_pages: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMovie {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireGenreList {
    #[serde(default)]
    pub genres: Vec<WireGenre>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireCredits {
    #[serde(default)]
    pub cast: Vec<WireCastMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireVideo {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireVideos {
    #[serde(default)]
    pub results: Vec<WireVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMovieDetail {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub overview: Option<String>,
    pub runtime: Option<i64>,
    #[serde(default)]
    pub genres: Vec<WireGenre>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub credits: Option<WireCredits>,
    pub videos: Option<WireVideos>,
}

/// Empty strings are as good as missing
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn page_number(raw: i64) -> u32 {
    u32::try_from(raw).unwrap_or(0)
}

fn display_title(title: Option<String>, original_title: Option<String>) -> String {
    non_empty(title)
        .or_else(|| non_empty(original_title))
        .unwrap_or_else(|| UNTITLED.to_string())
}

impl WireMovie {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: display_title(self.title, self.original_title),
            poster_path: non_empty(self.poster_path),
            release_date: non_empty(self.release_date),
            vote_average: self.vote_average,
        }
    }
}

impl WireGenre {
    pub fn into_genre(self) -> Genre {
        Genre {
            id: self.id,
            name: self.name,
        }
    }
}

impl WirePage {
    /// Map to a domain page, applying `filters` to the page's items.
    /// Items that fail summary validation are dropped.
    pub fn into_result_page(self, filters: Option<&SearchFilters>) -> ResultPage {
        let mut movies = self.results;
        if let Some(filters) = filters {
            apply_filters(&mut movies, filters);
        }

        let items = movies
            .into_iter()
            .map(WireMovie::into_summary)
            .filter(|movie| match validate_movie_summary(movie) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Dropping invalid movie from provider page: {}", e);
                    false
                }
            })
            .collect();

        ResultPage::new(items, page_number(self.page), page_number(self.total_pages))
    }
}

impl WireMovieDetail {
    pub fn into_detail(self) -> MovieDetail {
        let summary = MovieSummary {
            id: self.id,
            title: display_title(self.title, self.original_title),
            poster_path: non_empty(self.poster_path),
            release_date: non_empty(self.release_date),
            vote_average: self.vote_average,
        };

        MovieDetail {
            summary,
            overview: self.overview.unwrap_or_default(),
            runtime: self.runtime.and_then(|m| u32::try_from(m).ok()),
            genres: self.genres.into_iter().map(WireGenre::into_genre).collect(),
            cast: self
                .credits
                .unwrap_or_default()
                .cast
                .into_iter()
                .map(|c| CastMember {
                    id: c.id,
                    name: c.name,
                    character: non_empty(c.character),
                    profile_path: non_empty(c.profile_path),
                })
                .collect(),
            videos: self
                .videos
                .unwrap_or_default()
                .results
                .into_iter()
                .map(|v| Video {
                    id: v.id,
                    key: v.key,
                    name: v.name,
                    site: v.site,
                    kind: v.kind,
                })
                .collect(),
            tagline: non_empty(self.tagline),
            status: non_empty(self.status),
            backdrop_path: non_empty(self.backdrop_path),
            vote_count: self.vote_count.and_then(|c| u64::try_from(c).ok()),
        }
    }
}

/// Genre and rating filters plus ordering, applied within one page.
/// Year is sent upstream and not re-checked here.
pub(crate) fn apply_filters(movies: &mut Vec<WireMovie>, filters: &SearchFilters) {
    if let Some(genre) = filters.genre {
        movies.retain(|m| m.genre_ids.contains(&genre));
    }
    if let Some(min_rating) = filters.min_rating {
        movies.retain(|m| m.vote_average.unwrap_or(0.0) >= min_rating);
    }

    let desc = |a: Option<f64>, b: Option<f64>| {
        b.unwrap_or(0.0)
            .partial_cmp(&a.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
    };

    match filters.sort {
        Some(SortOrder::Popularity) => movies.sort_by(|a, b| desc(a.popularity, b.popularity)),
        Some(SortOrder::Rating) => movies.sort_by(|a, b| desc(a.vote_average, b.vote_average)),
        Some(SortOrder::ReleaseDate) => {
            movies.sort_by(|a, b| b.release_date.cmp(&a.release_date))
        }
        Some(SortOrder::Title) => movies.sort_by(|a, b| {
            let a = a.title.as_deref().unwrap_or_default().to_lowercase();
            let b = b.title.as_deref().unwrap_or_default().to_lowercase();
            a.cmp(&b)
        }),
        None => {}
    }
}
