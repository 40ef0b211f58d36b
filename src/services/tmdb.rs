use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{genre::GenreList, Genre, MovieList},
    services::CatalogueSource,
};

/// Filter parameters sent with every discovery request
const DISCOVER_PARAMS: [(&str, &str); 3] = [
    ("include_adult", "false"),
    ("include_video", "false"),
    ("sort_by", "popularity.desc"),
];

/// TMDB catalogue client
///
/// Issues bearer-authenticated requests against the TMDB v3 API. Endpoint
/// URLs and filter parameters are fixed; language and page vary per call.
/// One uniform request timeout applies to every call.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogueSource for TmdbClient {
    async fn discover_page(&self, page: u32, language: &str) -> AppResult<MovieList> {
        let url = format!("{}/discover/movie", self.api_url);
        let page = page.to_string();

        let mut query = DISCOVER_PARAMS.to_vec();
        query.push(("language", language));
        query.push(("page", &page));

        self.get_json(&url, &query).await
    }

    async fn search_page(&self, query: &str, page: u32, language: &str) -> AppResult<MovieList> {
        let url = format!("{}/search/movie", self.api_url);
        let page = page.to_string();

        self.get_json(
            &url,
            &[
                ("query", query),
                ("include_adult", "false"),
                ("language", language),
                ("page", &page),
            ],
        )
        .await
    }

    async fn genre_list(&self, language: &str) -> AppResult<Vec<Genre>> {
        let url = format!("{}/genre/movie/list", self.api_url);
        let list: GenreList = self.get_json(&url, &[("language", language)]).await?;
        Ok(list.genres)
    }
}
