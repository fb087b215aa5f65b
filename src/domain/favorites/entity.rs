use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::movie::{MovieId, MovieSummary};

/// Insertion-ordered set of favorite movies keyed by id.
///
/// `entries` holds display order; `index` maps an id to its position in
/// `entries` and is rebuilt past the removal point on every removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MovieSummary>", into = "Vec<MovieSummary>")]
pub struct FavoritesSet {
    entries: Vec<MovieSummary>,
    index: HashMap<MovieId, usize>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: MovieId) -> Option<&MovieSummary> {
        self.index.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Adds the movie unless its id is already present.
    /// Returns whether the set changed.
    pub fn insert(&mut self, movie: MovieSummary) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.index.insert(movie.id, self.entries.len());
        self.entries.push(movie);
        true
    }

    pub fn remove(&mut self, id: MovieId) -> Option<MovieSummary> {
        let pos = self.index.remove(&id)?;
        let removed = self.entries.remove(pos);
        for (offset, movie) in self.entries[pos..].iter().enumerate() {
            self.index.insert(movie.id, pos + offset);
        }
        Some(removed)
    }

    /// Flips membership of `movie.id`. Returns true when the movie is now a favorite.
    /// A movie added back after removal goes to the end.
    pub fn toggle(&mut self, movie: MovieSummary) -> bool {
        if self.remove(movie.id).is_some() {
            false
        } else {
            self.insert(movie)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieSummary> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<MovieSummary> {
        self.entries.clone()
    }
}

/// Duplicate ids keep their first occurrence.
impl From<Vec<MovieSummary>> for FavoritesSet {
    fn from(movies: Vec<MovieSummary>) -> Self {
        let mut set = Self::new();
        for movie in movies {
            set.insert(movie);
        }
        set
    }
}

impl From<FavoritesSet> for Vec<MovieSummary> {
    fn from(set: FavoritesSet) -> Self {
        set.entries
    }
}
