use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::AuthSession,
    models::{MovieDetails, MovieRecord, UserPreferences, SELECTABLE_GENRES},
    services::{movie_details, preferences, recommendations, title_search},
};

use super::{ApiJson, ApiPath, ApiQuery, AppState};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub director: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScoredMovieResponse {
    pub movie: MovieRecord,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub personalized: bool,
    pub count: usize,
    pub movies: Vec<ScoredMovieResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsResponse {
    pub movie: MovieRecord,
    pub details: MovieDetails,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Genres offered by the preference editor
pub async fn genres() -> Json<Vec<&'static str>> {
    Json(SELECTABLE_GENRES.to_vec())
}

/// Create an account with empty preferences
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput("Username cannot be empty".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::InvalidInput("Password cannot be empty".to_string()));
    }
    if request.password != request.confirm_password {
        return Err(AppError::InvalidInput("Passwords do not match".to_string()));
    }

    let created = state
        .users
        .register(username, &request.password, UserPreferences::new())
        .await?;

    if !created {
        return Err(AppError::Conflict(
            "Username already exists. Please choose another one.".to_string(),
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: username.to_string(),
        }),
    ))
}

/// Start a session
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = request.username.trim();

    if !state.users.authenticate(username, &request.password).await? {
        tracing::info!(username = %username, "Login rejected");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .sessions
        .create(username, state.paging.default_page_size)
        .await;
    tracing::info!(username = %username, "Logged in");

    Ok(Json(LoginResponse {
        token: token.to_string(),
        username: username.to_string(),
    }))
}

/// End the caller's session
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> StatusCode {
    state.sessions.remove(&auth.token).await;
    tracing::info!(username = %auth.username(), "Logged out");
    StatusCode::NO_CONTENT
}

/// Get the caller's stored preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Json<UserPreferences>> {
    let prefs = state.users.preferences(auth.username()).await?;
    Ok(Json(prefs))
}

/// Replace the caller's preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    ApiJson(request): ApiJson<UpdatePreferencesRequest>,
) -> AppResult<Json<UserPreferences>> {
    let prefs =
        preferences::build_preferences(&request.genres, &request.actors, &request.director)?;
    state
        .users
        .update_preferences(auth.username(), prefs.clone())
        .await?;
    Ok(Json(prefs))
}

async fn recommendations_for(
    state: &AppState,
    username: &str,
    count: usize,
) -> AppResult<RecommendationsResponse> {
    let prefs = state.users.preferences(username).await?;
    let page = recommendations::get_recommendations(&state.engine, &prefs, count)?;

    let movies: Vec<ScoredMovieResponse> = page
        .recommendations
        .into_iter()
        .map(|rec| ScoredMovieResponse {
            movie: rec.movie.clone(),
            score: rec.score,
        })
        .collect();

    Ok(RecommendationsResponse {
        personalized: page.personalized,
        count: movies.len(),
        movies,
    })
}

/// Top recommendations for the caller's current preferences
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    ApiQuery(query): ApiQuery<RecommendationsQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let count = query.count.unwrap_or(auth.session.page_size);
    let response = recommendations_for(&state, auth.username(), count).await?;
    Ok(Json(response))
}

/// Grow the session's page and return the longer list
pub async fn load_more(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> AppResult<Json<RecommendationsResponse>> {
    let count = state
        .sessions
        .grow_page(&auth.token, state.paging.page_step)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired or unknown".to_string()))?;

    let response = recommendations_for(&state, auth.username(), count).await?;
    Ok(Json(response))
}

/// Search the catalog by title
pub async fn search_movies(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let movies = title_search::search_titles(&state.engine, &params.q)?
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(movies))
}

/// Catalog record plus poster, summary and cast
pub async fn get_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<u64>,
) -> AppResult<Json<MovieDetailsResponse>> {
    let (movie, details) =
        movie_details::movie_details(&state.engine, state.metadata.as_ref(), movie_id).await?;

    Ok(Json(MovieDetailsResponse {
        movie: movie.clone(),
        details,
    }))
}
