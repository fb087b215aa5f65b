// src/services/collection_store.rs
//
// MovieCollectionStore - owns CollectionState
//
// RESPONSIBILITIES:
// - Trending and search feeds with pagination
// - Favorites membership and persistence
// - Hydration of favorites and last search at construction
// - Movie detail and genre pass-through
//
// CRITICAL RULES:
// - State is mutated only under the state lock, and the lock is never held
//   across an await
// - A response whose generation is no longer current is discarded
// - Persistence failures are logged, never returned
// - Events are emitted after the lock is released

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    validate_movie_summary, validate_result_page, FavoritesSet, Feed, Genre, MovieDetail, MovieId,
    MovieSummary, ResultPage, SearchFilters,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, FavoriteAdded, FavoriteRemoved, FeedLoadFailed, FeedLoadStarted, FeedLoaded,
    SearchCleared, StaleResponseDiscarded,
};
use crate::integrations::MovieGateway;
use crate::repositories::{storage_keys, KeyValueStore};

use super::collection_state::{CollectionSnapshot, CollectionState, FeedOutcome};

pub const TRENDING_ERROR_MESSAGE: &str = "Failed to fetch trending movies. Please try again.";
pub const SEARCH_ERROR_MESSAGE: &str = "Failed to search movies. Please try again.";
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to fetch movie details";

fn error_message(feed: Feed) -> &'static str {
    match feed {
        Feed::Trending => TRENDING_ERROR_MESSAGE,
        Feed::Search => SEARCH_ERROR_MESSAGE,
    }
}

pub struct MovieCollectionStore {
    gateway: Arc<dyn MovieGateway>,
    storage: Arc<dyn KeyValueStore>,
    event_bus: Arc<EventBus>,
    state: RwLock<CollectionState>,
}

impl MovieCollectionStore {
    /// Build the store and hydrate favorites and the last search query
    pub fn new(
        gateway: Arc<dyn MovieGateway>,
        storage: Arc<dyn KeyValueStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let state = CollectionState {
            favorites: hydrate_favorites(storage.as_ref()),
            current_query: hydrate_last_search(storage.as_ref()).unwrap_or_default(),
            ..Default::default()
        };

        Self {
            gateway,
            storage,
            event_bus,
            state: RwLock::new(state),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CollectionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CollectionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // TRENDING
    // ========================================================================

    /// Fetch a trending page. Page 1 replaces the feed, later pages append.
    pub async fn load_trending(&self, page: u32) -> FeedOutcome {
        let page = page.max(1);
        let generation = self.write_state().begin_load(Feed::Trending);
        self.announce_load(Feed::Trending, page, generation);
        let result = self.gateway.trending(page).await;
        self.finish_load(Feed::Trending, page, generation, result)
    }

    /// Fetch the next trending page when the feed is loaded and has more
    pub async fn load_more_trending(&self) -> FeedOutcome {
        let next_page = {
            let state = self.read_state();
            if !state.trending.can_load_more() {
                return FeedOutcome::Skipped;
            }
            state.trending.page_number() + 1
        };
        self.load_trending(next_page).await
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    /// Search for `query`. A blank query clears the search feed without
    /// calling the gateway. On success the query is saved as the last search.
    pub async fn search(&self, query: &str, filters: SearchFilters, page: u32) -> FeedOutcome {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return FeedOutcome::Skipped;
        }

        let page = page.max(1);
        let generation = self.write_state().begin_search(query, filters.clone());
        self.announce_load(Feed::Search, page, generation);

        let result = self.gateway.search(query, &filters, page).await;
        let outcome = self.finish_load(Feed::Search, page, generation, result);

        if outcome.is_loaded() {
            self.persist(storage_keys::LAST_SEARCH, query);
        }
        outcome
    }

    /// Fetch the next page of the current search
    pub async fn load_more_search(&self) -> FeedOutcome {
        let (query, filters, next_page) = {
            let state = self.read_state();
            if !state.search.can_load_more() || state.current_query.trim().is_empty() {
                return FeedOutcome::Skipped;
            }
            (
                state.current_query.clone(),
                state.current_filters.clone(),
                state.search.page_number() + 1,
            )
        };
        self.search(&query, filters, next_page).await
    }

    /// Re-run the hydrated last search from page 1 with default filters
    pub async fn resume_last_search(&self) -> FeedOutcome {
        let query = self.read_state().current_query.clone();
        if query.trim().is_empty() {
            return FeedOutcome::Skipped;
        }
        self.search(&query, SearchFilters::default(), 1).await
    }

    fn clear_search(&self) {
        self.write_state().clear_search();
        log::debug!("Search cleared by blank query");
        self.event_bus.emit(SearchCleared::new());
    }

    // ========================================================================
    // REQUEST LIFECYCLE
    // ========================================================================

    fn announce_load(&self, feed: Feed, page: u32, generation: u64) {
        log::debug!("Loading {} page {} (generation {})", feed, page, generation);
        self.event_bus
            .emit(FeedLoadStarted::new(feed, page, generation));
    }

    fn finish_load(
        &self,
        feed: Feed,
        page: u32,
        generation: u64,
        result: AppResult<ResultPage>,
    ) -> FeedOutcome {
        let mut state = self.write_state();

        if !state.feed(feed).is_current(generation) {
            let current_generation = state.feed(feed).generation();
            drop(state);
            log::debug!(
                "Discarding stale {} page {} (generation {}, current {})",
                feed,
                page,
                generation,
                current_generation
            );
            self.event_bus.emit(StaleResponseDiscarded::new(
                feed,
                page,
                generation,
                current_generation,
            ));
            return FeedOutcome::Discarded;
        }
        state.settle(feed);

        let result = result.and_then(|result_page| {
            validate_result_page(&result_page)?;
            Ok(result_page)
        });

        match result {
            Ok(result_page) => {
                let accumulator = state.feed_mut(feed);
                let received = accumulator.apply_page(page, result_page);
                let total_pages = accumulator.total_pages();
                let accumulated = accumulator.items().len();
                drop(state);

                log::info!(
                    "Loaded {} page {}/{} ({} items, {} total)",
                    feed,
                    page,
                    total_pages,
                    received,
                    accumulated
                );
                self.event_bus.emit(FeedLoaded::new(
                    feed,
                    page,
                    total_pages,
                    received,
                    accumulated,
                ));

                FeedOutcome::Loaded {
                    page,
                    total_pages,
                    received,
                }
            }
            Err(e) => {
                let message = error_message(feed);
                state.feed_mut(feed).fail();
                state.error = Some(message.to_string());
                drop(state);

                log::warn!("Failed to load {} page {}: {}", feed, page, e);
                self.event_bus
                    .emit(FeedLoadFailed::new(feed, page, message.to_string()));

                FeedOutcome::Failed
            }
        }
    }

    /// Abandon the feed's in-flight request. Its response will be discarded
    /// and the feed, query and error read as they did before the request.
    pub fn cancel(&self, feed: Feed) -> bool {
        let cancelled = self.write_state().cancel(feed);
        if cancelled {
            log::debug!("Cancelled in-flight {} request", feed);
        }
        cancelled
    }

    // ========================================================================
    // FAVORITES
    // ========================================================================

    /// Flip membership of `movie.id`. Returns true when it is now a favorite.
    pub fn toggle_favorite(&self, movie: MovieSummary) -> bool {
        let id = movie.id;
        let title = movie.title.clone();

        let now_favorite = {
            let mut state = self.write_state();
            let now_favorite = state.favorites.toggle(movie);
            self.persist_favorites(&state.favorites);
            now_favorite
        };

        if now_favorite {
            self.event_bus.emit(FavoriteAdded::new(id, title));
        } else {
            self.event_bus.emit(FavoriteRemoved::new(id));
        }
        now_favorite
    }

    /// Returns false when the movie was already a favorite
    pub fn add_favorite(&self, movie: MovieSummary) -> bool {
        let id = movie.id;
        let title = movie.title.clone();

        let added = {
            let mut state = self.write_state();
            let added = state.favorites.insert(movie);
            if added {
                self.persist_favorites(&state.favorites);
            }
            added
        };

        if added {
            self.event_bus.emit(FavoriteAdded::new(id, title));
        }
        added
    }

    pub fn remove_favorite(&self, id: MovieId) -> Option<MovieSummary> {
        let removed = {
            let mut state = self.write_state();
            let removed = state.favorites.remove(id);
            if removed.is_some() {
                self.persist_favorites(&state.favorites);
            }
            removed
        };

        if removed.is_some() {
            self.event_bus.emit(FavoriteRemoved::new(id));
        }
        removed
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.read_state().favorites.contains(id)
    }

    /// Favorites in insertion order
    pub fn favorites(&self) -> Vec<MovieSummary> {
        self.read_state().favorites.to_vec()
    }

    pub fn favorite_count(&self) -> usize {
        self.read_state().favorites.len()
    }

    // Called with the state guard held so writes land in mutation order
    fn persist_favorites(&self, favorites: &FavoritesSet) {
        match serde_json::to_string(favorites) {
            Ok(json) => self.persist(storage_keys::FAVORITES, &json),
            Err(e) => log::warn!("Failed to serialize favorites: {}", e),
        }
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            log::warn!("Failed to persist '{}': {}", key, e);
        }
    }

    // ========================================================================
    // PASS-THROUGH QUERIES
    // ========================================================================

    /// Fetch one movie's detail. Nothing is stored; failures go to the caller.
    pub async fn load_movie_detail(&self, id: MovieId) -> AppResult<MovieDetail> {
        self.gateway.movie_detail(id).await.map_err(|e| {
            log::warn!("Failed to fetch detail for movie {}: {}", id, e);
            AppError::Gateway(DETAIL_ERROR_MESSAGE.to_string())
        })
    }

    pub async fn load_genres(&self) -> AppResult<Vec<Genre>> {
        self.gateway.genres().await
    }

    // ========================================================================
    // SNAPSHOT
    // ========================================================================

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.read_state().snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().loading()
    }

    pub fn current_query(&self) -> String {
        self.read_state().current_query.clone()
    }
}

// ============================================================================
// HYDRATION
// ============================================================================

fn hydrate_favorites(storage: &dyn KeyValueStore) -> FavoritesSet {
    let raw = match storage.get(storage_keys::FAVORITES) {
        Ok(Some(raw)) => raw,
        Ok(None) => return FavoritesSet::new(),
        Err(e) => {
            log::warn!("Failed to read saved favorites: {}", e);
            return FavoritesSet::new();
        }
    };

    let movies: Vec<MovieSummary> = match serde_json::from_str(&raw) {
        Ok(movies) => movies,
        Err(e) => {
            log::warn!("Ignoring corrupt saved favorites: {}", e);
            return FavoritesSet::new();
        }
    };

    let favorites: FavoritesSet = movies
        .into_iter()
        .filter(|movie| match validate_movie_summary(movie) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Dropping invalid saved favorite: {}", e);
                false
            }
        })
        .collect::<Vec<_>>()
        .into();

    log::debug!("Hydrated {} favorites", favorites.len());
    favorites
}

fn hydrate_last_search(storage: &dyn KeyValueStore) -> Option<String> {
    match storage.get(storage_keys::LAST_SEARCH) {
        Ok(query) => query.filter(|q| !q.trim().is_empty()),
        Err(e) => {
            log::warn!("Failed to read last search: {}", e);
            None
        }
    }
}
