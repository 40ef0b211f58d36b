use crate::{
    error::AppResult,
    models::{Genre, MovieList},
};

/// Upstream movie catalogue abstraction.
///
/// One implementation talks to TMDB over HTTP; tests substitute a controlled
/// source. Each method covers exactly one upstream request, so the paging
/// and caching policy lives entirely in [`Catalogue`](crate::services::Catalogue).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Fetch one page of the popularity-sorted discovery listing
    async fn discover_page(&self, page: u32, language: &str) -> AppResult<MovieList>;

    /// Fetch one page of keyword search results
    async fn search_page(&self, query: &str, page: u32, language: &str) -> AppResult<MovieList>;

    /// Fetch the genre catalogue
    async fn genre_list(&self, language: &str) -> AppResult<Vec<Genre>>;
}
