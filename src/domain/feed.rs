// src/domain/feed.rs

use serde::{Deserialize, Serialize};

/// A paginated movie listing the store accumulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    Trending,
    Search,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Trending => "trending",
            Feed::Search => "search",
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
