/// Movie metadata provider abstraction
///
/// Providers enrich catalog movies with posters, summaries and cast photos.
/// The data is cosmetic: a provider never fails outward, it falls back to
/// [`MovieDetails::placeholder`] and logs the cause.
use crate::models::MovieDetails;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch poster, genres, summary and top cast for a movie id
    async fn fetch_details(&self, movie_id: u64) -> MovieDetails;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
