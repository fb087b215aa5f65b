// src/integrations/mod.rs
//
// External Integrations
//
// Infrastructure adapters only: they never touch collection state.

pub mod gateway;
pub mod tmdb;

pub use gateway::{MovieGateway, UnavailableGateway};
pub use tmdb::{ImageUrls, TmdbClient};
