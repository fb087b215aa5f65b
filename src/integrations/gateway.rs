// src/integrations/gateway.rs
//
// Movie metadata gateway contract
//
// The collection store depends on this trait only. Implementations own
// endpoint paths, authentication and the mapping of wire payloads into
// validated domain records. Provider failures are reported as `AppError::Gateway`.

use async_trait::async_trait;

use crate::domain::{Genre, MovieDetail, MovieId, ResultPage, SearchFilters};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// One page of this week's trending movies
    async fn trending(&self, page: u32) -> AppResult<ResultPage>;

    /// One page of results for `query`; `filters` are interpreted here, never by callers
    async fn search(&self, query: &str, filters: &SearchFilters, page: u32) -> AppResult<ResultPage>;

    /// Full record for one movie, with cast and videos
    async fn movie_detail(&self, id: MovieId) -> AppResult<MovieDetail>;

    /// Provider genre list, in provider order
    async fn genres(&self) -> AppResult<Vec<Genre>>;
}

/// Stand-in used when no provider can be built (for example, no API key).
/// Every call fails with the configuration problem, so offline features
/// such as favorites and theme keep working.
pub struct UnavailableGateway {
    reason: String,
}

impl UnavailableGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> AppError {
        AppError::Config(self.reason.clone())
    }
}

#[async_trait]
impl MovieGateway for UnavailableGateway {
    async fn trending(&self, _page: u32) -> AppResult<ResultPage> {
        Err(self.error())
    }

    async fn search(&self, _query: &str, _filters: &SearchFilters, _page: u32) -> AppResult<ResultPage> {
        Err(self.error())
    }

    async fn movie_detail(&self, _id: MovieId) -> AppResult<MovieDetail> {
        Err(self.error())
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        Err(self.error())
    }
}
