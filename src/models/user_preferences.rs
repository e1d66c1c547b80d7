use serde::{Deserialize, Serialize};

/// Genres a user can pick from when editing preferences
pub const SELECTABLE_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Foreign",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "TV Movie",
    "Thriller",
    "War",
    "Western",
];

/// Free-text taste profile used to build the recommendation query
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPreferences {
    /// Space-joined genre tokens
    #[serde(default)]
    pub genres: String,
    /// Favorite actors, comma or space separated
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub director: String,
}

impl UserPreferences {
    /// Creates empty preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Text projected into the vocabulary when ranking the catalog
    pub fn query_text(&self) -> String {
        format!("{} {} {}", self.genres, self.actors, self.director)
    }

    /// True when no field carries any non-whitespace text
    pub fn is_empty(&self) -> bool {
        self.genres.trim().is_empty()
            && self.actors.trim().is_empty()
            && self.director.trim().is_empty()
    }
}

/// Returns the canonical spelling of a selectable genre, matched case-insensitively
pub fn canonical_genre(name: &str) -> Option<&'static str> {
    let name = name.trim();
    SELECTABLE_GENRES
        .iter()
        .copied()
        .find(|genre| genre.eq_ignore_ascii_case(name))
}
