use serde::{Deserialize, Serialize};

pub const NO_DETAILS_SUMMARY: &str = "No details available.";
pub const NO_SUMMARY: &str = "No summary available.";

/// Cosmetic enrichment for a catalog movie, fetched from TMDb
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub poster_url: Option<String>,
    /// Genre names joined by ", "
    pub genres: String,
    pub summary: String,
    pub top_cast: Vec<CastMember>,
}

impl MovieDetails {
    /// Value returned when the metadata service cannot be reached or parsed
    pub fn placeholder() -> Self {
        Self {
            poster_url: None,
            genres: String::new(),
            summary: NO_DETAILS_SUMMARY.to_string(),
            top_cast: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub photo_url: Option<String>,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let details = MovieDetails::placeholder();
        assert_eq!(details.poster_url, None);
        assert_eq!(details.genres, "");
        assert_eq!(details.summary, "No details available.");
        assert!(details.top_cast.is_empty());
    }

    #[test]
    fn test_tmdb_movie_deserialization() {
        let json = r#"{
            "id": 135397,
            "poster_path": "/jjBgi2r5cRt36xF6iNUEhzscEcb.jpg",
            "genres": [{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}],
            "overview": "Twenty-two years after the events of Jurassic Park...",
            "runtime": 124
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_path.as_deref(), Some("/jjBgi2r5cRt36xF6iNUEhzscEcb.jpg"));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.genres[1].name, "Adventure");
    }

    #[test]
    fn test_tmdb_movie_tolerates_nulls_and_missing_fields() {
        let movie: TmdbMovie = serde_json::from_str(r#"{"poster_path": null}"#).unwrap();
        assert_eq!(movie.poster_path, None);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.overview, None);
    }
}
