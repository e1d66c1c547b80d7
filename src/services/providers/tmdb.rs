/// TMDb metadata provider
///
/// API Flow:
/// 1. Details: /movie/{id} → poster path, genres, overview
/// 2. Credits: /movie/{id}/credits → cast list with profile photos
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{CastMember, MovieDetails, TmdbCredits, TmdbMovie, NO_SUMMARY},
    services::providers::MetadataProvider,
};

const TOP_CAST: usize = 3;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!("No TMDb API key configured, movie details will be placeholders");
        }

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
        })
    }

    /// Full image URL for a TMDb path; empty paths have no image
    fn image(&self, path: Option<String>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", self.image_url, p))
    }

    fn build_details(&self, movie: TmdbMovie, credits: TmdbCredits) -> MovieDetails {
        let genres = movie
            .genres
            .into_iter()
            .map(|genre| genre.name)
            .collect::<Vec<_>>()
            .join(", ");

        let top_cast = credits
            .cast
            .into_iter()
            .take(TOP_CAST)
            .map(|member| CastMember {
                name: member.name,
                photo_url: self.image(member.profile_path),
            })
            .collect();

        MovieDetails {
            poster_url: self.image(movie.poster_path),
            genres,
            summary: movie.overview.unwrap_or_else(|| NO_SUMMARY.to_string()),
            top_cast,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, api_key: &str) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDb API returned status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse TMDb response: {}", e))
        })
    }

    async fn try_fetch(&self, api_key: &str, movie_id: u64) -> AppResult<MovieDetails> {
        let movie_url = format!("{}/movie/{}", self.api_url, movie_id);
        let credits_url = format!("{}/movie/{}/credits", self.api_url, movie_id);

        let movie: TmdbMovie = self.get_json(&movie_url, api_key).await?;
        let credits: TmdbCredits = self.get_json(&credits_url, api_key).await?;

        Ok(self.build_details(movie, credits))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: u64) -> MovieDetails {
        let Some(api_key) = self.api_key.as_deref() else {
            return MovieDetails::placeholder();
        };

        match self.try_fetch(api_key, movie_id).await {
            Ok(details) => {
                tracing::debug!(
                    movie_id = movie_id,
                    cast = details.top_cast.len(),
                    provider = "tmdb",
                    "Movie details fetched"
                );
                details
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    movie_id = movie_id,
                    provider = "tmdb",
                    "Error fetching movie details"
                );
                MovieDetails::placeholder()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
