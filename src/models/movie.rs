use serde::{Deserialize, Serialize};

/// One catalog entry with its normalized text fields.
///
/// Built once by the dataset loader and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// TMDb movie identifier
    pub id: u64,
    pub title: String,
    /// Space-separated genre tokens, multi-word genres collapsed ("ScienceFiction")
    pub genres: String,
    /// Up to three cast names, space-joined
    pub cast: String,
    pub director: String,
    pub keywords: String,
    /// genres + cast + director + keywords, the text used for similarity matching
    pub combined_features: String,
}

/// A catalog movie paired with its similarity to the query
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Recommendation<'a> {
    pub movie: &'a MovieRecord,
    pub score: f64,
}

/// Raw CSV row as it appears in the dataset file
#[derive(Debug, Clone, Deserialize)]
pub struct RawMovieRow {
    pub id: u64,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}
