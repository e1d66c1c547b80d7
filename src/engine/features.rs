//! Per-movie feature bag construction.
//!
//! Each catalog row is reduced to one text blob of genre, cast, director and
//! keyword tokens. The vectorizer only ever sees this blob.

/// Number of leading cast names kept per movie
pub const TOP_CAST: usize = 3;

/// Normalizes a pipe-delimited genre list into space-separated tokens.
///
/// Spaces inside a genre name are removed first, so "Science Fiction" stays a
/// single token ("ScienceFiction") after word tokenization. Whether collapsing
/// multi-word genres was intended as feature engineering or only works around
/// the tokenizer splitting on spaces has never been settled; the behavior is
/// kept either way.
pub fn normalize_genres(raw: Option<&str>) -> String {
    raw.unwrap_or_default().replace(' ', "").replace('|', " ")
}

/// Keeps the first [`TOP_CAST`] comma-separated names, joined by spaces
pub fn top_cast(raw: Option<&str>) -> String {
    match raw {
        Some(cast) if !cast.is_empty() => cast
            .split(',')
            .take(TOP_CAST)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

/// genres + cast + director + keywords, space-joined
pub fn combine_features(genres: &str, cast: &str, director: &str, keywords: &str) -> String {
    format!("{} {} {} {}", genres, cast, director, keywords)
}
