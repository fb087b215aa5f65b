use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Provider-assigned movie identifier
pub type MovieId = i64;

/// A movie as it appears in list results (trending, search, favorites)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Stable provider identifier
    pub id: MovieId,

    /// Display title
    pub title: String,

    /// Poster image path relative to the image CDN
    #[serde(default)]
    pub poster_path: Option<String>,

    /// Release date as sent by the provider (YYYY-MM-DD)
    #[serde(default)]
    pub release_date: Option<String>,

    /// Average user rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: None,
            vote_average: None,
        }
    }

    /// Year component of the release date, if it parses
    pub fn release_year(&self) -> Option<i32> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.year())
            .ok()
            .or_else(|| raw.get(..4).and_then(|year| year.parse().ok()))
    }

    /// Rating with one decimal place, or "N/A" when the provider sent none
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(rating) => format!("{:.1}", rating),
            None => "N/A".to_string(),
        }
    }
}

impl std::fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.release_year() {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{}", self.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,

    /// "Trailer", "Teaser", "Featurette", ...
    pub kind: String,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }

    /// Watch URL for sites we know how to link to
    pub fn watch_url(&self) -> Option<String> {
        if self.is_youtube() {
            Some(format!("https://www.youtube.com/watch?v={}", self.key))
        } else {
            None
        }
    }
}

/// Full movie record for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,

    pub overview: String,

    /// Runtime in minutes
    pub runtime: Option<u32>,

    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
    pub videos: Vec<Video>,

    pub tagline: Option<String>,
    pub status: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_count: Option<u64>,
}

impl MovieDetail {
    pub fn new(summary: MovieSummary) -> Self {
        Self {
            summary,
            overview: String::new(),
            runtime: None,
            genres: Vec::new(),
            cast: Vec::new(),
            videos: Vec::new(),
            tagline: None,
            status: None,
            backdrop_path: None,
            vote_count: None,
        }
    }

    pub fn id(&self) -> MovieId {
        self.summary.id
    }

    /// "N minutes", absent when the runtime is unknown or zero
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime
            .filter(|minutes| *minutes > 0)
            .map(|minutes| format!("{} minutes", minutes))
    }

    /// The official YouTube trailer, falling back to any YouTube video
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .iter()
            .find(|v| v.is_youtube() && v.kind == "Trailer")
            .or_else(|| self.videos.iter().find(|v| v.is_youtube()))
    }

    /// First `limit` billed cast members
    pub fn top_cast(&self, limit: usize) -> &[CastMember] {
        &self.cast[..self.cast.len().min(limit)]
    }
}
