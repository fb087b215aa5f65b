// src/services/collection_state.rs
//
// In-memory state owned by MovieCollectionStore.
//
// Everything here is synchronous and side-effect free: no gateway calls,
// no persistence, no events. The store drives these transitions under
// its lock and performs I/O around them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FavoritesSet, Feed, MovieSummary, ResultPage, SearchFilters};

/// Per-feed request state: `Idle → Loading → {Loaded, Failed}`, re-enterable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What a list operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The response was merged into the feed
    Loaded {
        page: u32,
        total_pages: u32,
        received: usize,
    },
    /// The gateway failed; the feed kept its items and `error` was set
    Failed,
    /// No gateway call was made
    Skipped,
    /// A newer request or a cancel superseded this one
    Discarded,
}

impl FeedOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedOutcome::Loaded { .. })
    }
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// The growing list for one feed plus its pagination cursor
#[derive(Debug, Clone)]
pub struct FeedAccumulator {
    items: Vec<MovieSummary>,
    page_number: u32,
    total_pages: u32,
    status: FeedStatus,
    generation: u64,
    /// Status to fall back to when an in-flight request is cancelled
    status_before_load: FeedStatus,
}

impl FeedAccumulator {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page_number: 1,
            total_pages: 0,
            status: FeedStatus::Idle,
            generation: 0,
            status_before_load: FeedStatus::Idle,
        }
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Whether `load_more` may proceed
    pub fn can_load_more(&self) -> bool {
        self.status == FeedStatus::Loaded && self.has_more()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Start a request and return its generation. Any request already in
    /// flight becomes stale.
    pub fn begin_load(&mut self) -> u64 {
        if self.status != FeedStatus::Loading {
            self.status_before_load = self.status;
        }
        self.generation += 1;
        self.status = FeedStatus::Loading;
        self.generation
    }

    /// Merge a response for `requested_page`. Page 1 replaces the list,
    /// later pages append in arrival order without deduplication.
    /// Returns the number of items received.
    pub fn apply_page(&mut self, requested_page: u32, page: ResultPage) -> usize {
        let received = page.items.len();
        if requested_page <= 1 {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.page_number = requested_page.max(1);
        self.total_pages = page.total_pages;
        self.status = FeedStatus::Loaded;
        received
    }

    /// Mark the current request failed. Items and cursor are untouched.
    pub fn fail(&mut self) {
        self.status = FeedStatus::Failed;
    }

    /// Abandon the in-flight request, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        if self.status != FeedStatus::Loading {
            return false;
        }
        self.generation += 1;
        self.status = self.status_before_load;
        true
    }

    /// Empty the feed with the cursor at page 1 of 1
    pub fn clear(&mut self) {
        self.items.clear();
        self.page_number = 1;
        self.total_pages = 1;
        self.generation += 1;
        self.status = FeedStatus::Idle;
        self.status_before_load = FeedStatus::Idle;
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            page_number: self.page_number,
            total_pages: self.total_pages,
            has_more: self.has_more(),
            status: self.status,
        }
    }
}

impl Default for FeedAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// COLLECTION STATE
// ============================================================================

/// What a cancel puts back: the query a search replaced and the error the
/// load cleared
#[derive(Debug, Clone, Default)]
pub(super) struct LoadCheckpoint {
    query: String,
    filters: SearchFilters,
    error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    pub trending: FeedAccumulator,
    pub search: FeedAccumulator,
    pub favorites: FavoritesSet,
    pub current_query: String,
    pub current_filters: SearchFilters,
    pub error: Option<String>,
    /// Taken when a feed leaves a settled status, dropped once its load resolves
    pub(super) checkpoints: HashMap<Feed, LoadCheckpoint>,
}

impl CollectionState {
    /// Start a load on `feed` and return its generation. The global error
    /// is cleared; a cancel restores it.
    pub fn begin_load(&mut self, feed: Feed) -> u64 {
        if self.feed(feed).status() != FeedStatus::Loading {
            let checkpoint = LoadCheckpoint {
                query: self.current_query.clone(),
                filters: self.current_filters.clone(),
                error: self.error.clone(),
            };
            self.checkpoints.insert(feed, checkpoint);
        }
        self.error = None;
        self.feed_mut(feed).begin_load()
    }

    /// Start a search load and make `query` and `filters` current
    pub fn begin_search(&mut self, query: &str, filters: SearchFilters) -> u64 {
        let generation = self.begin_load(Feed::Search);
        self.current_query = query.to_string();
        self.current_filters = filters;
        generation
    }

    /// The current request on `feed` was merged or failed
    pub fn settle(&mut self, feed: Feed) {
        self.checkpoints.remove(&feed);
    }

    /// Abandon the in-flight request on `feed`. Status, search query,
    /// filters and error go back to what they were before the load.
    pub fn cancel(&mut self, feed: Feed) -> bool {
        if !self.feed_mut(feed).cancel() {
            return false;
        }
        if let Some(checkpoint) = self.checkpoints.remove(&feed) {
            if feed == Feed::Search {
                self.current_query = checkpoint.query;
                self.current_filters = checkpoint.filters;
            }
            // another feed may have failed meanwhile
            if self.error.is_none() {
                self.error = checkpoint.error;
            }
        }
        true
    }

    /// Empty the search feed and forget the current query
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.checkpoints.remove(&Feed::Search);
        self.current_query.clear();
        self.current_filters = SearchFilters::default();
    }

    pub fn feed(&self, feed: Feed) -> &FeedAccumulator {
        match feed {
            Feed::Trending => &self.trending,
            Feed::Search => &self.search,
        }
    }

    pub fn feed_mut(&mut self, feed: Feed) -> &mut FeedAccumulator {
        match feed {
            Feed::Trending => &mut self.trending,
            Feed::Search => &mut self.search,
        }
    }

    /// True while either feed has a request in flight
    pub fn loading(&self) -> bool {
        self.trending.status() == FeedStatus::Loading || self.search.status() == FeedStatus::Loading
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            trending: self.trending.snapshot(),
            search: self.search.snapshot(),
            favorites: self.favorites.to_vec(),
            current_query: self.current_query.clone(),
            loading: self.loading(),
            error: self.error.clone(),
        }
    }
}

// ============================================================================
// SNAPSHOTS (read-only view for the view layer)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub items: Vec<MovieSummary>,
    pub page_number: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub status: FeedStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSnapshot {
    pub trending: FeedSnapshot,
    pub search: FeedSnapshot,
    pub favorites: Vec<MovieSummary>,
    pub current_query: String,
    pub loading: bool,
    pub error: Option<String>,
}
