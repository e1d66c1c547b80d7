use crate::{
    engine::RecommendationEngine,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieRecord},
    services::providers::MetadataProvider,
};

/// Looks a catalog movie up and enriches it with provider metadata
pub async fn movie_details<'a>(
    engine: &'a RecommendationEngine,
    provider: &dyn MetadataProvider,
    movie_id: u64,
) -> AppResult<(&'a MovieRecord, MovieDetails)> {
    let movie = engine
        .find_movie(movie_id)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))?;

    let details = provider.fetch_details(movie_id).await;
    tracing::debug!(movie_id = movie_id, provider = provider.name(), "Movie details resolved");

    Ok((movie, details))
}
