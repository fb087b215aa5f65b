// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod auth_service;
pub mod collection_state;
pub mod collection_store;
pub mod theme_service;

#[cfg(test)]
mod collection_store_tests;

// Re-export all services and their types
pub use collection_state::{
    CollectionSnapshot,
    CollectionState,
    FeedAccumulator,
    FeedOutcome,
    FeedSnapshot,
    FeedStatus,
};

pub use collection_store::{
    MovieCollectionStore,
    DETAIL_ERROR_MESSAGE,
    SEARCH_ERROR_MESSAGE,
    TRENDING_ERROR_MESSAGE,
};

pub use theme_service::ThemeService;

pub use auth_service::AuthService;
