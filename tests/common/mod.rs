//! Common test utilities for driving the API in-process.
//!
//! Provides a test fixture wiring the router to an in-memory cache store and
//! a stub catalogue source, so tests run without Redis or network access.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use nexus_api::api::{create_router, AppState};
use nexus_api::db::{Cache, MemoryStore};
use nexus_api::error::{AppError, AppResult};
use nexus_api::models::{Genre, Movie, MovieList};
use nexus_api::services::{Catalogue, CatalogueSource};

pub const PAGE_SIZE: usize = 2;

/// Stub upstream catalogue with controllable failures and call counters.
///
/// Serves a fixed movie pool in discovery pages of two. Individual discovery
/// pages can be failed, and the next search call can be failed once, to
/// exercise the partial-aggregation and error-not-cached paths.
pub struct StubSource {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub fail_pages: HashSet<u32>,
    pub fail_next_search: AtomicBool,
    pub discover_calls: AtomicU32,
    pub search_calls: AtomicU32,
}

impl StubSource {
    pub fn with_fixture_movies() -> Self {
        let movies = vec![
            movie(1, "Edge of Action", vec![28]),
            movie(2, "Skyward", vec![12, 16]),
            movie(3, "Deep Waters", vec![99]),
            movie(4, "Action Run", vec![28, 12]),
            movie(5, "Quiet Days", vec![]),
            movie(6, "Long Night", vec![18]),
        ];

        let genres = vec![
            genre(28, "Action"),
            genre(12, "Adventure"),
            genre(16, "Animation"),
            genre(18, "Drama"),
            genre(99, "Documentary"),
        ];

        Self {
            movies,
            genres,
            fail_pages: HashSet::new(),
            fail_next_search: AtomicBool::new(false),
            discover_calls: AtomicU32::new(0),
            search_calls: AtomicU32::new(0),
        }
    }

    pub fn failing_pages(pages: impl IntoIterator<Item = u32>) -> Self {
        let mut source = Self::with_fixture_movies();
        source.fail_pages = pages.into_iter().collect();
        source
    }

    pub fn fail_next_search(&self) {
        self.fail_next_search.store(true, Ordering::SeqCst);
    }

    pub fn discover_calls(&self) -> u32 {
        self.discover_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> u32 {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogueSource for StubSource {
    async fn discover_page(&self, page: u32, _language: &str) -> AppResult<MovieList> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_pages.contains(&page) {
            return Err(AppError::Upstream(format!(
                "TMDB returned status 500 (page {})",
                page
            )));
        }

        let start = (page as usize - 1) * PAGE_SIZE;
        let results = self
            .movies
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        Ok(MovieList { results })
    }

    async fn search_page(&self, query: &str, _page: u32, _language: &str) -> AppResult<MovieList> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_next_search.swap(false, Ordering::SeqCst) {
            return Err(AppError::Upstream("TMDB returned status 503".to_string()));
        }

        let needle = query.to_lowercase();
        let results = self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(MovieList { results })
    }

    async fn genre_list(&self, _language: &str) -> AppResult<Vec<Genre>> {
        Ok(self.genres.clone())
    }
}

pub fn movie(id: i64, title: &str, genre_ids: Vec<i64>) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: Some(format!("Overview of {}", title)),
        release_date: Some("2024-01-01".to_string()),
        popularity: 10.0,
        poster_path: Some(format!("/poster-{}.jpg", id)),
        genre_ids,
    }
}

pub fn genre(id: i64, name: &str) -> Genre {
    Genre {
        id,
        name: name.to_string(),
    }
}

/// In-process server fixture with a stub catalogue and in-memory cache
pub struct TestFixture {
    pub router: Router,
    pub source: Arc<StubSource>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_source(StubSource::with_fixture_movies()).await
    }

    pub async fn with_source(source: StubSource) -> Self {
        let source = Arc::new(source);

        let (cache, handle) = Cache::new(Arc::new(MemoryStore::new())).await;
        // Writer must outlive the fixture
        std::mem::forget(handle);

        let catalogue = Catalogue::new(source.clone(), cache);
        let state = AppState::new(
            catalogue,
            "https://image.tmdb.org/t/p/w500".to_string(),
            3,
        );

        Self {
            router: create_router(state),
            source,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> TestResponse {
        self.send(Method::POST, path, body).await
    }

    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let request = builder.body(body).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    /// Waits long enough for the background cache writer to drain
    pub async fn let_cache_settle(&self) {
        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    }
}
