// src/services/collection_store_tests.rs
//
// MovieCollectionStore behaviour
//
// INVARIANTS TESTED:
// - Page 1 replaces a feed, later pages append in order without dedup
// - Gateway failures keep the previous items and set a fixed message
// - A blank query never reaches the gateway and resets the search feed
// - Two toggles of the same id restore membership; a re-added movie goes last
// - Favorites and the last search survive a restart through storage
// - Persistence failures never fail an operation
// - Responses superseded by a newer request or a cancel are discarded
// - A cancel restores the previous query, filters and error

#[cfg(test)]
mod store_tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use crate::domain::{Feed, MovieDetail, MovieSummary, ResultPage, SearchFilters, SortOrder};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::integrations::gateway::MockMovieGateway;
    use crate::repositories::{storage_keys, InMemoryKeyValueStore, KeyValueStore};
    use crate::services::collection_state::{FeedOutcome, FeedStatus};
    use crate::services::collection_store::{
        MovieCollectionStore, DETAIL_ERROR_MESSAGE, SEARCH_ERROR_MESSAGE, TRENDING_ERROR_MESSAGE,
    };

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn movie(id: i64, title: &str) -> MovieSummary {
        MovieSummary::new(id, title)
    }

    fn page(movies: &[(i64, &str)], page_number: u32, total_pages: u32) -> ResultPage {
        ResultPage::new(
            movies.iter().map(|&(id, title)| movie(id, title)).collect(),
            page_number,
            total_pages,
        )
    }

    fn gateway_failure() -> AppError {
        AppError::Gateway("connection reset".to_string())
    }

    struct Harness {
        store: MovieCollectionStore,
        storage: Arc<InMemoryKeyValueStore>,
        event_bus: Arc<EventBus>,
    }

    fn harness(gateway: MockMovieGateway) -> Harness {
        harness_with_storage(gateway, Arc::new(InMemoryKeyValueStore::new()))
    }

    fn harness_with_storage(
        gateway: MockMovieGateway,
        storage: Arc<InMemoryKeyValueStore>,
    ) -> Harness {
        let event_bus = Arc::new(EventBus::new());
        let store = MovieCollectionStore::new(Arc::new(gateway), storage.clone(), event_bus.clone());
        Harness {
            store,
            storage,
            event_bus,
        }
    }

    fn trending_ids(store: &MovieCollectionStore) -> Vec<i64> {
        store.snapshot().trending.items.iter().map(|m| m.id).collect()
    }

    fn search_ids(store: &MovieCollectionStore) -> Vec<i64> {
        store.snapshot().search.items.iter().map(|m| m.id).collect()
    }

    // ========================================================================
    // TRENDING
    // ========================================================================

    #[tokio::test]
    async fn test_trending_two_pages_accumulate_until_exhausted() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_trending()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(page(&[(1, "A")], 1, 2)));
        gateway
            .expect_trending()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(page(&[(2, "B")], 2, 2)));
        let h = harness(gateway);

        assert!(h.store.load_trending(1).await.is_loaded());
        assert_eq!(
            h.store.load_trending(2).await,
            FeedOutcome::Loaded {
                page: 2,
                total_pages: 2,
                received: 1
            }
        );

        let snapshot = h.store.snapshot();
        assert_eq!(trending_ids(&h.store), vec![1, 2]);
        assert_eq!(snapshot.trending.items[1].title, "B");
        assert!(!snapshot.trending.has_more);
        assert_eq!(snapshot.trending.status, FeedStatus::Loaded);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_reloading_page_one_replaces() {
        let mut gateway = MockMovieGateway::new();
        let mut calls = 0;
        gateway
            .expect_trending()
            .with(eq(1))
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Ok(page(&[(1, "A"), (2, "B")], 1, 3))
                } else {
                    Ok(page(&[(3, "C")], 1, 3))
                }
            });
        let h = harness(gateway);

        h.store.load_trending(1).await;
        h.store.load_trending(1).await;

        assert_eq!(trending_ids(&h.store), vec![3]);
    }

    #[tokio::test]
    async fn test_pages_append_without_dedup() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_trending()
            .with(eq(1))
            .returning(|_| Ok(page(&[(1, "A"), (2, "B")], 1, 3)));
        gateway
            .expect_trending()
            .with(eq(2))
            .returning(|_| Ok(page(&[(2, "B"), (3, "C")], 2, 3)));
        let h = harness(gateway);

        h.store.load_trending(1).await;
        h.store.load_trending(2).await;

        assert_eq!(trending_ids(&h.store), vec![1, 2, 2, 3]);
        assert!(h.store.snapshot().trending.has_more);
    }

    #[tokio::test]
    async fn test_page_zero_requests_page_one() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_trending()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(page(&[(1, "A")], 1, 1)));
        let h = harness(gateway);

        assert!(h.store.load_trending(0).await.is_loaded());
        assert_eq!(h.store.snapshot().trending.page_number, 1);
    }

    #[tokio::test]
    async fn test_trending_failure_keeps_items_and_sets_error() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_trending()
            .with(eq(1))
            .returning(|_| Ok(page(&[(1, "A")], 1, 2)));
        gateway
            .expect_trending()
            .with(eq(2))
            .returning(|_| Err(gateway_failure()));
        let h = harness(gateway);

        h.store.load_trending(1).await;
        assert_eq!(h.store.load_trending(2).await, FeedOutcome::Failed);

        let snapshot = h.store.snapshot();
        assert_eq!(trending_ids(&h.store), vec![1]);
        assert_eq!(snapshot.trending.page_number, 1);
        assert_eq!(snapshot.trending.status, FeedStatus::Failed);
        assert_eq!(snapshot.error.as_deref(), Some(TRENDING_ERROR_MESSAGE));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_error_cleared_when_next_load_starts() {
        let mut gateway = MockMovieGateway::new();
        let mut calls = 0;
        gateway.expect_trending().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(gateway_failure())
            } else {
                Ok(page(&[(1, "A")], 1, 1))
            }
        });
        let h = harness(gateway);

        h.store.load_trending(1).await;
        assert!(h.store.snapshot().error.is_some());

        h.store.load_trending(1).await;
        assert_eq!(h.store.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_load_more_trending_follows_cursor() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_trending()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(page(&[(1, "A")], 1, 2)));
        gateway
            .expect_trending()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(page(&[(2, "B")], 2, 2)));
        let h = harness(gateway);

        // Nothing loaded yet
        assert_eq!(h.store.load_more_trending().await, FeedOutcome::Skipped);

        h.store.load_trending(1).await;
        assert!(h.store.load_more_trending().await.is_loaded());

        // Last page reached
        assert_eq!(h.store.load_more_trending().await, FeedOutcome::Skipped);
        assert_eq!(trending_ids(&h.store), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_trending_emits_lifecycle_events() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_trending()
            .returning(|_| Ok(page(&[(1, "A")], 1, 1)));
        let h = harness(gateway);

        h.store.load_trending(1).await;

        let types: Vec<String> = h
            .event_bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["FeedLoadStarted", "FeedLoaded"]);
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    #[tokio::test]
    async fn test_blank_query_never_calls_gateway() {
        let mut gateway = MockMovieGateway::new();
        gateway.expect_search().never();
        let h = harness(gateway);

        assert_eq!(
            h.store.search("", SearchFilters::default(), 1).await,
            FeedOutcome::Skipped
        );
        assert_eq!(
            h.store.search("   ", SearchFilters::default(), 3).await,
            FeedOutcome::Skipped
        );

        let snapshot = h.store.snapshot();
        assert!(snapshot.search.items.is_empty());
        assert_eq!(snapshot.search.page_number, 1);
        assert_eq!(snapshot.search.total_pages, 1);
        assert_eq!(snapshot.current_query, "");
    }

    #[tokio::test]
    async fn test_blank_query_clears_previous_results() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_search()
            .times(1)
            .returning(|_, _, _| Ok(page(&[(1, "Heat")], 1, 4)));
        let h = harness(gateway);

        h.store.search("heat", SearchFilters::default(), 1).await;
        assert_eq!(search_ids(&h.store), vec![1]);

        h.store.search("  ", SearchFilters::default(), 1).await;

        let snapshot = h.store.snapshot();
        assert!(snapshot.search.items.is_empty());
        assert_eq!(snapshot.search.total_pages, 1);
        assert_eq!(snapshot.search.status, FeedStatus::Idle);
        assert!(!snapshot.search.has_more);
    }

    #[tokio::test]
    async fn test_search_passes_query_and_filters_through() {
        let filters = SearchFilters {
            genre: Some(28),
            year: Some(1995),
            min_rating: Some(7.0),
            sort: Some(SortOrder::Rating),
        };
        let expected = filters.clone();

        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_search()
            .withf(move |query: &str, f: &SearchFilters, page: &u32| {
                query == "heat" && *f == expected && *page == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(page(&[(949, "Heat")], 1, 1)));
        let h = harness(gateway);

        assert!(h.store.search("  heat ", filters, 1).await.is_loaded());
        assert_eq!(h.store.current_query(), "heat");
    }

    #[tokio::test]
    async fn test_search_failure_keeps_previous_results() {
        let mut gateway = MockMovieGateway::new();
        let mut calls = 0;
        gateway.expect_search().returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Ok(page(&[(1, "Alien"), (2, "Aliens")], 1, 1))
            } else {
                Err(gateway_failure())
            }
        });
        let h = harness(gateway);

        h.store.search("alien", SearchFilters::default(), 1).await;
        assert_eq!(
            h.store.search("predator", SearchFilters::default(), 1).await,
            FeedOutcome::Failed
        );

        let snapshot = h.store.snapshot();
        assert_eq!(search_ids(&h.store), vec![1, 2]);
        assert_eq!(snapshot.error.as_deref(), Some(SEARCH_ERROR_MESSAGE));
        assert_eq!(snapshot.search.status, FeedStatus::Failed);
    }

    #[tokio::test]
    async fn test_successful_search_saves_last_query() {
        let mut gateway = MockMovieGateway::new();
        let mut calls = 0;
        gateway.expect_search().returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Ok(page(&[(1, "Heat")], 1, 1))
            } else {
                Err(gateway_failure())
            }
        });
        let h = harness(gateway);

        h.store.search("heat", SearchFilters::default(), 1).await;
        h.store.search("ronin", SearchFilters::default(), 1).await;

        assert_eq!(
            h.storage.get(storage_keys::LAST_SEARCH).unwrap().as_deref(),
            Some("heat")
        );
    }

    #[tokio::test]
    async fn test_load_more_search_reuses_query_and_filters() {
        let filters = SearchFilters {
            sort: Some(SortOrder::Title),
            ..Default::default()
        };
        let expected = filters.clone();

        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_search()
            .withf(|_: &str, _: &SearchFilters, page: &u32| *page == 1)
            .returning(|_, _, _| Ok(page(&[(1, "Alien")], 1, 2)));
        gateway
            .expect_search()
            .withf(move |query: &str, f: &SearchFilters, page: &u32| {
                query == "alien" && *f == expected && *page == 2
            })
            .times(1)
            .returning(|_, _, _| Ok(page(&[(2, "Aliens")], 2, 2)));
        let h = harness(gateway);

        h.store.search("alien", filters, 1).await;
        assert!(h.store.load_more_search().await.is_loaded());
        assert_eq!(search_ids(&h.store), vec![1, 2]);
        assert_eq!(h.store.load_more_search().await, FeedOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_resume_last_search_uses_hydrated_query() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        storage.set(storage_keys::LAST_SEARCH, "matrix").unwrap();

        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_search()
            .withf(|query: &str, f: &SearchFilters, page: &u32| {
                query == "matrix" && f.is_empty() && *page == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(page(&[(603, "The Matrix")], 1, 1)));
        let h = harness_with_storage(gateway, storage);

        assert_eq!(h.store.current_query(), "matrix");
        assert!(h.store.resume_last_search().await.is_loaded());
        assert_eq!(search_ids(&h.store), vec![603]);
    }

    #[tokio::test]
    async fn test_resume_without_saved_query_is_skipped() {
        let mut gateway = MockMovieGateway::new();
        gateway.expect_search().never();
        let h = harness(gateway);

        assert_eq!(h.store.resume_last_search().await, FeedOutcome::Skipped);
    }

    // ========================================================================
    // FAVORITES
    // ========================================================================

    #[test]
    fn test_toggle_favorite_scenario() {
        let h = harness(MockMovieGateway::new());

        assert!(h.store.toggle_favorite(movie(5, "X")));
        assert!(h.store.is_favorite(5));

        assert!(!h.store.toggle_favorite(movie(5, "X")));
        assert!(!h.store.is_favorite(5));
    }

    #[test]
    fn test_even_toggles_restore_favorites() {
        let h = harness(MockMovieGateway::new());
        h.store.add_favorite(movie(1, "A"));
        h.store.add_favorite(movie(2, "B"));
        let before = h.store.favorites();

        for _ in 0..4 {
            h.store.toggle_favorite(movie(2, "B"));
        }
        for _ in 0..2 {
            h.store.toggle_favorite(movie(9, "Z"));
        }

        assert_eq!(h.store.favorites(), before);
    }

    #[test]
    fn test_even_toggles_of_first_favorite_keep_membership() {
        let h = harness(MockMovieGateway::new());
        for (id, title) in [(1, "A"), (2, "B"), (3, "C")] {
            h.store.add_favorite(movie(id, title));
        }
        let mut before: Vec<i64> = h.store.favorites().iter().map(|m| m.id).collect();

        h.store.toggle_favorite(movie(1, "A"));
        h.store.toggle_favorite(movie(1, "A"));

        let mut after: Vec<i64> = h.store.favorites().iter().map(|m| m.id).collect();
        // re-adding appends
        assert_eq!(after, vec![2, 3, 1]);

        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(after, before);
        assert!(h.store.is_favorite(1));
        assert_eq!(h.store.favorite_count(), 3);
    }

    #[test]
    fn test_toggle_stores_full_summary_in_insertion_order() {
        let h = harness(MockMovieGateway::new());
        let mut heat = movie(949, "Heat");
        heat.vote_average = Some(7.9);

        h.store.toggle_favorite(movie(3, "C"));
        h.store.toggle_favorite(heat.clone());

        let favorites = h.store.favorites();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].id, 3);
        assert_eq!(favorites[1], heat);
        assert_eq!(h.store.favorite_count(), 2);
    }

    #[test]
    fn test_add_and_remove_favorite() {
        let h = harness(MockMovieGateway::new());

        assert!(h.store.add_favorite(movie(1, "A")));
        assert!(!h.store.add_favorite(movie(1, "A again")));
        assert_eq!(h.store.favorites()[0].title, "A");

        assert_eq!(h.store.remove_favorite(1).map(|m| m.id), Some(1));
        assert_eq!(h.store.remove_favorite(1), None);
        assert_eq!(h.store.favorite_count(), 0);
    }

    #[test]
    fn test_favorites_persist_and_hydrate() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let first = harness_with_storage(MockMovieGateway::new(), storage.clone());
        first.store.toggle_favorite(movie(1, "A"));
        first.store.toggle_favorite(movie(2, "B"));
        first.store.toggle_favorite(movie(1, "A"));

        let saved = storage.get(storage_keys::FAVORITES).unwrap().unwrap();
        let saved: Vec<MovieSummary> = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, vec![movie(2, "B")]);

        let second = harness_with_storage(MockMovieGateway::new(), storage);
        assert!(second.store.is_favorite(2));
        assert!(!second.store.is_favorite(1));
    }

    #[test]
    fn test_corrupt_saved_favorites_start_empty() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        storage.set(storage_keys::FAVORITES, "{not a list").unwrap();

        let h = harness_with_storage(MockMovieGateway::new(), storage);
        assert_eq!(h.store.favorite_count(), 0);

        h.store.toggle_favorite(movie(5, "X"));
        assert!(h.store.is_favorite(5));
    }

    #[test]
    fn test_invalid_saved_favorites_are_dropped() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        storage
            .set(
                storage_keys::FAVORITES,
                r#"[{"id":0,"title":"Broken"},{"id":7,"title":"Se7en"},{"id":7,"title":"Dup"}]"#,
            )
            .unwrap();

        let h = harness_with_storage(MockMovieGateway::new(), storage);
        let favorites = h.store.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "Se7en");
    }

    #[test]
    fn test_favorite_events() {
        let h = harness(MockMovieGateway::new());
        h.store.toggle_favorite(movie(5, "X"));
        h.store.toggle_favorite(movie(5, "X"));

        let types: Vec<String> = h
            .event_bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["FavoriteAdded", "FavoriteRemoved"]);
    }

    // ========================================================================
    // PERSISTENCE FAILURES
    // ========================================================================

    /// Storage that reads nothing and refuses every write
    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> crate::error::AppResult<Option<String>> {
            Err(AppError::Other("disk unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> crate::error::AppResult<()> {
            Err(AppError::Other("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> crate::error::AppResult<()> {
            Err(AppError::Other("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_never_fail_operations() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_search()
            .returning(|_, _, _| Ok(page(&[(1, "Heat")], 1, 1)));
        let store = MovieCollectionStore::new(
            Arc::new(gateway),
            Arc::new(BrokenStorage),
            Arc::new(EventBus::new()),
        );

        assert!(store.search("heat", SearchFilters::default(), 1).await.is_loaded());
        assert_eq!(store.snapshot().error, None);

        assert!(store.toggle_favorite(movie(5, "X")));
        assert!(store.is_favorite(5));
    }

    // ========================================================================
    // DETAIL & GENRES
    // ========================================================================

    #[tokio::test]
    async fn test_movie_detail_is_returned_not_stored() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_movie_detail()
            .with(eq(949))
            .returning(|id| Ok(MovieDetail::new(MovieSummary::new(id, "Heat"))));
        let h = harness(gateway);

        let detail = h.store.load_movie_detail(949).await.unwrap();
        assert_eq!(detail.id(), 949);

        let snapshot = h.store.snapshot();
        assert!(snapshot.trending.items.is_empty());
        assert!(snapshot.search.items.is_empty());
    }

    #[tokio::test]
    async fn test_movie_detail_failure_goes_to_caller() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_movie_detail()
            .returning(|_| Err(gateway_failure()));
        let h = harness(gateway);

        match h.store.load_movie_detail(1).await {
            Err(AppError::Gateway(message)) => assert_eq!(message, DETAIL_ERROR_MESSAGE),
            other => panic!("expected gateway error, got {:?}", other),
        }
        assert_eq!(h.store.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_genres_pass_through() {
        let mut gateway = MockMovieGateway::new();
        gateway.expect_genres().times(1).returning(|| {
            Ok(vec![crate::domain::Genre {
                id: 28,
                name: "Action".to_string(),
            }])
        });
        let h = harness(gateway);

        let genres = h.store.load_genres().await.unwrap();
        assert_eq!(genres[0].name, "Action");
    }

    // ========================================================================
    // OUT-OF-ORDER RESPONSES & CANCELLATION
    // ========================================================================

    mod gated {
        use std::sync::Mutex;

        use async_trait::async_trait;
        use tokio::sync::{oneshot, Notify};

        use crate::domain::{Genre, MovieDetail, MovieId, ResultPage, SearchFilters};
        use crate::error::{AppError, AppResult};
        use crate::integrations::MovieGateway;

        /// Trending and search calls park until the test releases them, in any order
        #[derive(Default)]
        pub struct GatedGateway {
            pending: Mutex<Vec<Option<oneshot::Sender<AppResult<ResultPage>>>>>,
            searches: Mutex<Vec<(String, u32)>>,
            arrived: Notify,
        }

        impl GatedGateway {
            async fn park(&self) -> AppResult<ResultPage> {
                let (tx, rx) = oneshot::channel();
                self.pending.lock().unwrap().push(Some(tx));
                self.arrived.notify_one();
                rx.await
                    .unwrap_or_else(|_| Err(AppError::Other("gate dropped".to_string())))
            }

            /// `(query, page)` of every search call, in arrival order
            pub fn searches(&self) -> Vec<(String, u32)> {
                self.searches.lock().unwrap().clone()
            }

            pub async fn wait_for_calls(&self, count: usize) {
                loop {
                    if self.pending.lock().unwrap().len() >= count {
                        return;
                    }
                    self.arrived.notified().await;
                }
            }

            /// Complete call number `index` (0-based, in arrival order)
            pub fn release(&self, index: usize, result: AppResult<ResultPage>) {
                let sender = self.pending.lock().unwrap()[index].take().unwrap();
                let _ = sender.send(result);
            }
        }

        #[async_trait]
        impl MovieGateway for GatedGateway {
            async fn trending(&self, _page: u32) -> AppResult<ResultPage> {
                self.park().await
            }

            async fn search(
                &self,
                query: &str,
                _filters: &SearchFilters,
                page: u32,
            ) -> AppResult<ResultPage> {
                self.searches.lock().unwrap().push((query.to_string(), page));
                self.park().await
            }

            async fn movie_detail(&self, _id: MovieId) -> AppResult<MovieDetail> {
                Err(AppError::Other("not scripted".to_string()))
            }

            async fn genres(&self) -> AppResult<Vec<Genre>> {
                Err(AppError::Other("not scripted".to_string()))
            }
        }
    }

    fn gated_store() -> (Arc<MovieCollectionStore>, Arc<gated::GatedGateway>, Arc<EventBus>) {
        let gateway = Arc::new(gated::GatedGateway::default());
        let event_bus = Arc::new(EventBus::new());
        let store = Arc::new(MovieCollectionStore::new(
            gateway.clone(),
            Arc::new(InMemoryKeyValueStore::new()),
            event_bus.clone(),
        ));
        (store, gateway, event_bus)
    }

    #[tokio::test]
    async fn test_stale_response_arriving_late_is_discarded() {
        let (store, gateway, event_bus) = gated_store();

        let older = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(1).await;

        let newer = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(2).await;

        gateway.release(1, Ok(page(&[(2, "Newer")], 1, 1)));
        assert!(newer.await.unwrap().is_loaded());

        gateway.release(0, Ok(page(&[(1, "Older")], 1, 1)));
        assert_eq!(older.await.unwrap(), FeedOutcome::Discarded);

        assert_eq!(trending_ids(&store), vec![2]);
        assert_eq!(store.snapshot().trending.status, FeedStatus::Loaded);
        assert!(event_bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "StaleResponseDiscarded"));
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_set_error() {
        let (store, gateway, _) = gated_store();

        let older = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(1).await;
        let newer = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(2).await;

        gateway.release(1, Ok(page(&[(2, "Newer")], 1, 1)));
        newer.await.unwrap();
        gateway.release(0, Err(AppError::Gateway("timeout".to_string())));

        assert_eq!(older.await.unwrap(), FeedOutcome::Discarded);
        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_response() {
        let (store, gateway, _) = gated_store();

        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(1).await;
        assert!(store.is_loading());

        assert!(store.cancel(Feed::Trending));
        assert!(!store.is_loading());
        assert_eq!(store.snapshot().trending.status, FeedStatus::Idle);

        gateway.release(0, Ok(page(&[(1, "Late")], 1, 1)));
        assert_eq!(pending.await.unwrap(), FeedOutcome::Discarded);
        assert!(store.snapshot().trending.items.is_empty());

        assert!(!store.cancel(Feed::Trending));
    }

    #[tokio::test]
    async fn test_cancelled_search_keeps_previous_query_for_load_more() {
        let (store, gateway, _) = gated_store();

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.search("alien", SearchFilters::default(), 1).await }
        });
        gateway.wait_for_calls(1).await;
        gateway.release(0, Ok(page(&[(101, "Alien")], 1, 2)));
        assert!(first.await.unwrap().is_loaded());

        let replaced = tokio::spawn({
            let store = store.clone();
            async move { store.search("brazil", SearchFilters::default(), 1).await }
        });
        gateway.wait_for_calls(2).await;
        assert_eq!(store.current_query(), "brazil");

        assert!(store.cancel(Feed::Search));
        assert_eq!(store.current_query(), "alien");
        assert_eq!(store.snapshot().search.status, FeedStatus::Loaded);

        gateway.release(1, Ok(page(&[(201, "Brazil")], 1, 3)));
        assert_eq!(replaced.await.unwrap(), FeedOutcome::Discarded);

        let more = tokio::spawn({
            let store = store.clone();
            async move { store.load_more_search().await }
        });
        gateway.wait_for_calls(3).await;
        gateway.release(2, Ok(page(&[(102, "Aliens")], 2, 2)));
        assert!(more.await.unwrap().is_loaded());

        assert_eq!(search_ids(&store), vec![101, 102]);
        assert_eq!(
            gateway.searches(),
            vec![
                ("alien".to_string(), 1),
                ("brazil".to_string(), 1),
                ("alien".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_cancelled_retry_keeps_failure_message() {
        let (store, gateway, _) = gated_store();

        let failing = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(1).await;
        gateway.release(0, Err(gateway_failure()));
        assert_eq!(failing.await.unwrap(), FeedOutcome::Failed);

        let retry = tokio::spawn({
            let store = store.clone();
            async move { store.load_trending(1).await }
        });
        gateway.wait_for_calls(2).await;
        assert_eq!(store.snapshot().error, None);

        assert!(store.cancel(Feed::Trending));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.trending.status, FeedStatus::Failed);
        assert_eq!(snapshot.error.as_deref(), Some(TRENDING_ERROR_MESSAGE));

        gateway.release(1, Ok(page(&[(1, "Late")], 1, 1)));
        assert_eq!(retry.await.unwrap(), FeedOutcome::Discarded);
        assert_eq!(store.snapshot().error.as_deref(), Some(TRENDING_ERROR_MESSAGE));
    }
}
