use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::pagination::{paginate, PageParams, Paginated};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{FavoriteMovie, Genre, Movie, MovieResponse};
use crate::services::catalogue::DEFAULT_LANGUAGE;
use crate::services::{find_by_id, recommend};

// Request/Response types

#[derive(Debug, Default, Deserialize)]
pub struct LanguageParams {
    pub language: Option<String>,
}

impl LanguageParams {
    fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    /// Upstream search page, defaults to 1
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGenresRequest {
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub favorite_genres: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct AddFavoriteResponse {
    pub message: String,
    pub data: FavoriteMovie,
}

/// Renders upstream records for a response, resolving genre names.
///
/// A failed genre lookup degrades to empty genre lists rather than failing
/// the whole request.
async fn render_movies(state: &AppState, movies: &[Movie], language: &str) -> Vec<MovieResponse> {
    let genre_names = match state.catalogue.genre_names(language).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(error = %e, "Genre lookup failed, rendering without genre names");
            HashMap::new()
        }
    };

    movies
        .iter()
        .map(|movie| MovieResponse::render(movie, &state.image_base_url, &genre_names))
        .collect()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List trending movies, paginated
pub async fn list_movies(
    State(state): State<AppState>,
    Query(pages): Query<PageParams>,
    Query(lang): Query<LanguageParams>,
) -> AppResult<Json<Paginated<MovieResponse>>> {
    let trending = state
        .catalogue
        .trending(state.trending_pages, lang.language())
        .await?;

    let rendered = render_movies(&state, &trending.results, lang.language()).await;
    Ok(Json(paginate(rendered, &pages)))
}

/// Retrieve one movie from the trending window by its catalogue ID
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Query(lang): Query<LanguageParams>,
) -> AppResult<Json<MovieResponse>> {
    let trending = state
        .catalogue
        .trending(state.trending_pages, lang.language())
        .await?;

    let movie = find_by_id(movie_id, &trending.results)
        .ok_or_else(|| AppError::NotFound("Sorry, movie not found".to_string()))?
        .clone();

    let rendered = render_movies(&state, std::slice::from_ref(&movie), lang.language()).await;
    let response = rendered
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal("Rendering produced no output".to_string()))?;

    Ok(Json(response))
}

/// Search the catalogue by keyword
pub async fn search_movies(
    State(state): State<AppState>,
    Query(search): Query<SearchParams>,
    Query(pages): Query<PageParams>,
    Query(lang): Query<LanguageParams>,
) -> AppResult<Json<Paginated<MovieResponse>>> {
    let query = search
        .q
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query parameter 'q' is required".to_string()))?;

    let found = state
        .catalogue
        .search(query, search.page.unwrap_or(1), lang.language())
        .await?;

    if found.results.is_empty() {
        return Err(AppError::NotFound(format!("Movie: {} not found", query)));
    }

    let rendered = render_movies(&state, &found.results, lang.language()).await;
    Ok(Json(paginate(rendered, &pages)))
}

/// List all movie genres, name-ordered and paginated
pub async fn genre_list(
    State(state): State<AppState>,
    Query(pages): Query<PageParams>,
    Query(lang): Query<LanguageParams>,
) -> AppResult<Json<Paginated<Genre>>> {
    let mut genres = state.catalogue.genres(lang.language()).await?;
    genres.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(paginate(genres, &pages)))
}

/// Personalized recommendations from the trending window.
///
/// With favorite genres stored, the window is filtered down to intersecting
/// movies; without any, the full trending list is returned with a hint.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(pages): Query<PageParams>,
    Query(lang): Query<LanguageParams>,
) -> AppResult<Json<Paginated<MovieResponse>>> {
    let favorite_genres = state.user.read().await.preferences.favorite_genres.clone();

    let trending = state
        .catalogue
        .trending(state.trending_pages, lang.language())
        .await?;

    let recommended = recommend(&favorite_genres, trending.results);
    let rendered = render_movies(&state, &recommended, lang.language()).await;

    let message = if favorite_genres.is_empty() {
        "Showing trending movies. Add favorite genres to get personalized recommendations."
    } else {
        "Personalized recommendations based on your favorite genres."
    };

    Ok(Json(paginate(rendered, &pages).with_message(message)))
}

/// Retrieve the stored favorite-genre preferences
pub async fn get_preferences(State(state): State<AppState>) -> Json<PreferencesResponse> {
    let mut favorite_genres: Vec<i64> = state
        .user
        .read()
        .await
        .preferences
        .favorite_genres
        .iter()
        .copied()
        .collect();
    favorite_genres.sort_unstable();

    Json(PreferencesResponse { favorite_genres })
}

/// Replace the favorite-genre preferences.
///
/// Every submitted ID is validated against the genre catalogue.
pub async fn update_favorite_genres(
    State(state): State<AppState>,
    Query(lang): Query<LanguageParams>,
    Json(request): Json<UpdateGenresRequest>,
) -> AppResult<Json<PreferencesResponse>> {
    let known = state.catalogue.genre_names(lang.language()).await?;

    for genre_id in &request.genre_ids {
        if !known.contains_key(genre_id) {
            return Err(AppError::InvalidInput(format!(
                "Unknown genre id: {}",
                genre_id
            )));
        }
    }

    let mut user = state.user.write().await;
    user.preferences.favorite_genres = request.genre_ids.iter().copied().collect();

    let mut favorite_genres: Vec<i64> = user.preferences.favorite_genres.iter().copied().collect();
    favorite_genres.sort_unstable();

    Ok(Json(PreferencesResponse { favorite_genres }))
}

/// List the favorites catalogue, oldest first
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteMovie>> {
    let mut favorites: Vec<FavoriteMovie> =
        state.user.read().await.favorites.values().cloned().collect();
    favorites.sort_by_key(|f| f.date_favorited);

    Json(favorites)
}

/// Add a movie from the current trending window to the favorites catalogue
pub async fn add_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Query(lang): Query<LanguageParams>,
) -> AppResult<(StatusCode, Json<AddFavoriteResponse>)> {
    let trending = state
        .catalogue
        .trending(state.trending_pages, lang.language())
        .await?;

    let movie = find_by_id(movie_id, &trending.results)
        .ok_or_else(|| AppError::NotFound("Movie not found in the trending window".to_string()))?;

    let mut user = state.user.write().await;

    if let Some(existing) = user.favorites.get(&movie_id) {
        return Ok((
            StatusCode::OK,
            Json(AddFavoriteResponse {
                message: "Movie already in favorites".to_string(),
                data: existing.clone(),
            }),
        ));
    }

    let favorite = FavoriteMovie::from_movie(movie, &state.image_base_url);
    user.favorites.insert(movie_id, favorite.clone());

    Ok((
        StatusCode::CREATED,
        Json(AddFavoriteResponse {
            message: "Movie added to favorites".to_string(),
            data: favorite,
        }),
    ))
}

/// Remove a movie from the favorites catalogue
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<StatusCode> {
    let removed = state.user.write().await.favorites.remove(&movie_id);

    match removed {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound(
            "Movie not found in your catalogue".to_string(),
        )),
    }
}
