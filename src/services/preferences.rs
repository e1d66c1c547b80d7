use crate::{
    engine::features::normalize_genres,
    error::{AppError, AppResult},
    models::{canonical_genre, UserPreferences},
};

/// Builds stored preferences from the genre picker and free-text fields.
///
/// Genres are validated against the selectable list and normalized the same
/// way catalog genres are, so "Science Fiction" becomes the catalog token
/// "ScienceFiction". Duplicate picks collapse to one.
pub fn build_preferences(
    genres: &[String],
    actors: &str,
    director: &str,
) -> AppResult<UserPreferences> {
    let mut selected: Vec<&'static str> = Vec::with_capacity(genres.len());
    for genre in genres {
        let canonical = canonical_genre(genre)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown genre: {}", genre)))?;
        if !selected.contains(&canonical) {
            selected.push(canonical);
        }
    }

    let genres = selected
        .into_iter()
        .map(|genre| normalize_genres(Some(genre)))
        .collect::<Vec<_>>()
        .join(" ");

    Ok(UserPreferences {
        genres,
        actors: actors.trim().to_string(),
        director: director.trim().to_string(),
    })
}
