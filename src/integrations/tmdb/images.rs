// src/integrations/tmdb/images.rs
//
// Image CDN URL construction

/// Shown in place of a missing poster
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image+Available";

pub const DEFAULT_POSTER_SIZE: &str = "w500";

#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Poster URL at `size` ("w185", "w500", ...), or the placeholder
    pub fn poster(&self, path: Option<&str>, size: &str) -> String {
        match path {
            Some(path) if !path.is_empty() => format!("{}/{}{}", self.base_url, size, path),
            _ => POSTER_PLACEHOLDER.to_string(),
        }
    }

    /// Full-resolution backdrop URL; no placeholder
    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/original{}", self.base_url, p))
    }

    /// Cast headshot, w185
    pub fn profile(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/w185{}", self.base_url, p))
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new("https://image.tmdb.org/t/p")
    }
}
