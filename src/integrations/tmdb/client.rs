// src/integrations/tmdb/client.rs
//
// TMDB API Integration
//
// ARCHITECTURE:
// - REST client for TMDB v3
// - Handles authentication (api_key query parameter) and language
// - Maps wire payloads → validated domain records (NO state mutation)
// - Used by MovieCollectionStore through the MovieGateway trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never touches collection state
// - Every failure becomes AppError::Gateway

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;

use super::wire::{WireGenreList, WireMovieDetail, WirePage};
use crate::config::TmdbConfig;
use crate::domain::{Genre, MovieDetail, MovieId, ResultPage, SearchFilters};
use crate::error::{AppError, AppResult};
use crate::integrations::gateway::MovieGateway;

/// TMDB API Client
pub struct TmdbClient {
    base_url: String,
    http_client: Client,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a client from configuration. An API key is required.
    pub fn new(config: &TmdbConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config("TMDB API key is not configured".to_string()))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            api_key,
            language: config.language.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// GET `path` with the common parameters plus `params`, decoding JSON
    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("TMDB GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("TMDB request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!(
                "TMDB returned status {} for {}: {}",
                status, path, message
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse TMDB response for {}: {}", path, e)))
    }
}

#[async_trait]
impl MovieGateway for TmdbClient {
    async fn trending(&self, page: u32) -> AppResult<ResultPage> {
        let wire: WirePage = self
            .get_json("/trending/movie/week", &[("page", page.to_string())])
            .await?;
        Ok(wire.into_result_page(None))
    }

    async fn search(&self, query: &str, filters: &SearchFilters, page: u32) -> AppResult<ResultPage> {
        let mut params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = filters.year {
            params.push(("primary_release_year", year.to_string()));
        }

        let wire: WirePage = self.get_json("/search/movie", &params).await?;
        Ok(wire.into_result_page(Some(filters)))
    }

    async fn movie_detail(&self, id: MovieId) -> AppResult<MovieDetail> {
        let wire: WireMovieDetail = self
            .get_json(
                &format!("/movie/{}", id),
                &[("append_to_response", "videos,credits".to_string())],
            )
            .await?;
        Ok(wire.into_detail())
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let wire: WireGenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(wire.genres.into_iter().map(|g| g.into_genre()).collect())
    }
}
