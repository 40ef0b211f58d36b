use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{Genre, Movie, MovieList},
    services::CatalogueSource,
};

pub const TRENDING_CACHE_TTL: u64 = 86_400; // 24 hours
pub const SEARCH_CACHE_TTL: u64 = 3_600; // 1 hour
pub const GENRE_CACHE_TTL: u64 = 3_600; // 1 hour

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Cache-through facade over the upstream catalogue.
///
/// All read paths go through here: trending and genre lookups via the
/// cache-through accessor, search with its own cache handling so upstream
/// failures are never stored. There is no single-flight guard; concurrent
/// misses for the same key may each invoke the upstream and the last write
/// wins, which is acceptable because all values for a key are equivalent
/// within the TTL window.
#[derive(Clone)]
pub struct Catalogue {
    source: Arc<dyn CatalogueSource>,
    cache: Cache,
}

impl Catalogue {
    pub fn new(source: Arc<dyn CatalogueSource>, cache: Cache) -> Self {
        Self { source, cache }
    }

    /// Fetches and concatenates discovery pages `1..=max_pages`.
    ///
    /// A page that fails with a transport error or non-success status is
    /// logged and skipped; the aggregate keeps whatever the remaining pages
    /// returned, in page order. Pages are not retried.
    async fn fetch_pages(&self, max_pages: u32, language: &str) -> MovieList {
        let mut all_results = MovieList::default();

        for page in 1..=max_pages {
            match self.source.discover_page(page, language).await {
                Ok(list) => all_results.extend(list),
                Err(e) => {
                    tracing::warn!(page, language, error = %e, "Discovery page fetch failed, skipping");
                }
            }
        }

        all_results
    }

    /// Returns the trending window, cached for 24 hours.
    ///
    /// The cache key carries both language and page count, so windows of
    /// different sizes never read each other's entries.
    pub async fn trending(&self, max_pages: u32, language: &str) -> AppResult<MovieList> {
        let key = CacheKey::Trending {
            language: language.to_string(),
            max_pages,
        };

        cached!(self.cache, key, TRENDING_CACHE_TTL, async {
            let list = self.fetch_pages(max_pages, language).await;

            tracing::info!(
                max_pages,
                language,
                results = list.results.len(),
                "Trending window fetched from upstream"
            );

            Ok::<_, AppError>(list)
        })
    }

    /// Searches the catalogue by keyword, one upstream page per call.
    ///
    /// Manages its own cache read and write instead of going through the
    /// cache-through accessor: an upstream failure must reach the caller as
    /// an error and must not be cached, so the next identical request
    /// retries upstream. Successful results are cached for an hour under the
    /// exact query text.
    pub async fn search(&self, query: &str, page: u32, language: &str) -> AppResult<MovieList> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let key = CacheKey::Search {
            language: language.to_string(),
            query: query.to_string(),
            page,
        };

        if let Some(hit) = self.cache.get_json(&key).await? {
            return Ok(hit);
        }

        let list = self.source.search_page(query, page, language).await?;

        tracing::info!(
            query,
            page,
            results = list.results.len(),
            "Search completed"
        );

        self.cache.set_in_background(&key, &list, SEARCH_CACHE_TTL);
        Ok(list)
    }

    /// Returns the genre catalogue, cached for an hour
    pub async fn genres(&self, language: &str) -> AppResult<Vec<Genre>> {
        let key = CacheKey::Genres {
            language: language.to_string(),
        };

        cached!(self.cache, key, GENRE_CACHE_TTL, async {
            self.source.genre_list(language).await
        })
    }

    /// Genre id-to-name map for rendering movie responses
    pub async fn genre_names(&self, language: &str) -> AppResult<HashMap<i64, String>> {
        let genres = self.genres(language).await?;
        Ok(genres.into_iter().map(|g| (g.id, g.name)).collect())
    }
}

/// Finds the first movie with the given id in a result list.
///
/// Linear scan; result sets are at most a few hundred items per cache
/// window, so no index is maintained.
pub fn find_by_id(target_id: i64, results: &[Movie]) -> Option<&Movie> {
    results.iter().find(|movie| movie.id == target_id)
}

/// Filters a trending list down to movies matching the user's favorite genres.
///
/// A movie is kept when its genre ids intersect the favorite set; input
/// order is preserved. An empty favorite set returns the full list
/// unfiltered. This is a plain filter, not a ranking.
pub fn recommend(favorite_genres: &HashSet<i64>, movies: Vec<Movie>) -> Vec<Movie> {
    if favorite_genres.is_empty() {
        return movies;
    }

    movies
        .into_iter()
        .filter(|movie| movie.genre_ids.iter().any(|id| favorite_genres.contains(id)))
        .collect()
}
