// src/integrations/tmdb/mod.rs
//
// The Movie Database (TMDB) v3 integration

pub mod client;
pub mod images;
mod wire;

pub use client::TmdbClient;
pub use images::ImageUrls;
