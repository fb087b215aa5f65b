//! Critical Favorites Invariants:
//!
//! 1. No two entries share a movie id
//! 2. Membership checks never scan the list
//! 3. Entries keep the order in which they were added
//! 4. The full summary is stored, not just the id
//! 5. Toggling the same movie twice restores the previous membership

pub mod entity;

pub use entity::FavoritesSet;
