use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Movie;

/// Favorite-genre selection used for personalized recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    pub favorite_genres: HashSet<i64>,
}

/// A movie saved to the user's favorites catalogue.
///
/// Captures a snapshot of the movie at the time it was favorited, since the
/// catalogue record itself expires with its cache entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteMovie {
    pub movie_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub genre_ids: Vec<i64>,
    pub date_favorited: DateTime<Utc>,
}

impl FavoriteMovie {
    pub fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            description: movie.overview.clone(),
            release_date: movie.release_date.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| crate::models::movie::poster_url(image_base_url, path)),
            genre_ids: movie.genre_ids.clone(),
            date_favorited: Utc::now(),
        }
    }
}
