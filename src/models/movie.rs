use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single movie record as returned by the upstream catalogue.
///
/// Fields mirror the upstream response verbatim; unknown fields are ignored
/// and optional fields default. Records are never persisted relationally,
/// they live only as long as their cache entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    /// Left as an opaque string, upstream does not guarantee a valid date
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

/// Aggregated result set returned by the trending and search facades.
///
/// Built by concatenating per-page `results` arrays in page order; failed
/// pages are skipped, so the list may cover fewer pages than requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieList {
    #[serde(default)]
    pub results: Vec<Movie>,
}

impl MovieList {
    pub fn extend(&mut self, other: MovieList) {
        self.results.extend(other.results);
    }
}

/// Movie record rendered for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub movie_id: i64,
    pub title: String,
    pub popularity: f64,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
}

impl MovieResponse {
    /// Renders an upstream record into the response shape, resolving the
    /// poster URL and genre names.
    pub fn render(movie: &Movie, image_base_url: &str, genre_names: &HashMap<i64, String>) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            popularity: movie.popularity,
            release_date: movie.release_date.clone(),
            description: movie.overview.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| poster_url(image_base_url, path)),
            genres: movie
                .genre_ids
                .iter()
                .filter_map(|id| genre_names.get(id).cloned())
                .collect(),
        }
    }
}

/// Joins the image base URL and a poster path, stripping the redundant slash.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}
