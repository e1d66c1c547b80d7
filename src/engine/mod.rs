//! Content-based recommendation core.
//!
//! [`RecommendationEngine`] owns the catalog together with the vocabulary and
//! term matrix fitted from it. Row `i` of the matrix always describes catalog
//! entry `i`; the only way to build an engine is from a catalog, so the two
//! cannot drift apart. The engine is read-only after construction and is
//! shared between requests behind an `Arc`.

use std::path::Path;

use crate::{
    error::AppResult,
    models::{MovieRecord, Recommendation, UserPreferences},
};

pub mod dataset;
pub mod features;
pub mod similarity;
pub mod stop_words;
pub mod vectorizer;

pub use dataset::Catalog;
pub use similarity::ScoredRow;
pub use vectorizer::{SparseVector, TermMatrix, Vocabulary};

#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: Catalog,
    vocabulary: Vocabulary,
    matrix: TermMatrix,
}

impl RecommendationEngine {
    /// Fits the vocabulary and term matrix over `catalog`
    pub fn new(catalog: Catalog) -> Self {
        let (vocabulary, matrix) =
            vectorizer::fit(catalog.iter().map(|movie| movie.combined_features.as_str()));

        tracing::info!(
            movies = catalog.len(),
            vocabulary = vocabulary.len(),
            "Recommendation engine fitted"
        );

        Self {
            catalog,
            vocabulary,
            matrix,
        }
    }

    /// Loads the catalog CSV and fits the engine over it
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let catalog = dataset::load(path)?;
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &TermMatrix {
        &self.matrix
    }

    /// Ranks the whole catalog against free text
    pub fn rank_text(&self, text: &str) -> Vec<ScoredRow> {
        let query = self.vocabulary.transform(text);
        similarity::rank(&query, &self.matrix)
    }

    /// Up to `count` catalog movies, best match first.
    ///
    /// Preferences with no recognized terms rank every movie at 0, which
    /// leaves the catalog in its original order.
    pub fn recommend(&self, preferences: &UserPreferences, count: usize) -> Vec<Recommendation<'_>> {
        self.rank_text(&preferences.query_text())
            .into_iter()
            .take(count)
            .filter_map(|scored| {
                self.catalog.get(scored.row).map(|movie| Recommendation {
                    movie,
                    score: scored.score,
                })
            })
            .collect()
    }

    /// Movies whose title contains `query`, ignoring case, in catalog order
    pub fn search_titles(&self, query: &str) -> Vec<&MovieRecord> {
        let needle = query.trim().to_lowercase();
        self.catalog
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn find_movie(&self, id: u64) -> Option<&MovieRecord> {
        self.catalog.find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMovieRow;

    fn movie(id: u64, title: &str, genres: &str, cast: &str, director: &str) -> MovieRecord {
        MovieRecord::from(RawMovieRow {
            id,
            original_title: Some(title.to_string()),
            genres: Some(genres.to_string()),
            cast: Some(cast.to_string()),
            director: Some(director.to_string()),
            keywords: None,
        })
    }

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(Catalog::new(vec![
            movie(1, "Heat", "Crime|Drama", "Al Pacino,Robert De Niro", "Michael Mann"),
            movie(2, "Airplane!", "Comedy", "Leslie Nielsen", "Jim Abrahams"),
            movie(3, "Interstellar", "Science Fiction|Drama", "Matthew McConaughey", "Christopher Nolan"),
            movie(4, "The Godfather", "Crime|Drama", "Marlon Brando,Al Pacino", "Francis Ford Coppola"),
        ]))
    }

    fn prefs(genres: &str, actors: &str, director: &str) -> UserPreferences {
        UserPreferences {
            genres: genres.to_string(),
            actors: actors.to_string(),
            director: director.to_string(),
        }
    }

    fn ids(recommendations: &[Recommendation<'_>]) -> Vec<u64> {
        recommendations.iter().map(|r| r.movie.id).collect()
    }

    #[test]
    fn test_matrix_rows_match_catalog() {
        let engine = engine();
        assert_eq!(engine.matrix().rows(), engine.catalog().len());
        assert_eq!(engine.matrix().columns(), engine.vocabulary().len());
    }

    #[test]
    fn test_recommend_prefers_matching_director() {
        let engine = engine();
        let result = engine.recommend(&prefs("", "", "Christopher Nolan"), 1);
        assert_eq!(ids(&result), vec![3]);
        assert!(result[0].score > 0.0);
    }

    #[test]
    fn test_recommend_combines_fields() {
        let engine = engine();
        let result = engine.recommend(&prefs("Crime", "Al Pacino", "Francis Ford Coppola"), 2);
        assert_eq!(ids(&result), vec![4, 1]);
    }

    #[test]
    fn test_multi_word_genre_matches_collapsed_token() {
        let engine = engine();
        let result = engine.recommend(&prefs("ScienceFiction", "", ""), 1);
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_empty_preferences_fall_back_to_catalog_order() {
        let engine = engine();
        let result = engine.recommend(&UserPreferences::new(), 3);
        assert_eq!(ids(&result), vec![1, 2, 3]);
        assert!(result.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_count_larger_than_catalog() {
        let engine = engine();
        let result = engine.recommend(&prefs("Comedy", "", ""), 50);
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].movie.id, 2);
    }

    #[test]
    fn test_recommend_is_repeatable() {
        let engine = engine();
        let preferences = prefs("Drama", "Al Pacino", "");
        assert_eq!(
            ids(&engine.recommend(&preferences, 5)),
            ids(&engine.recommend(&preferences, 5))
        );
    }

    #[test]
    fn test_zero_count() {
        assert!(engine().recommend(&prefs("Drama", "", ""), 0).is_empty());
    }

    #[test]
    fn test_search_titles_case_insensitive() {
        let engine = engine();
        let hits: Vec<u64> = engine.search_titles("THE").iter().map(|m| m.id).collect();
        assert_eq!(hits, vec![4]);
        let hits: Vec<u64> = engine.search_titles("e").iter().map(|m| m.id).collect();
        assert_eq!(hits, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_find_movie() {
        let engine = engine();
        assert_eq!(engine.find_movie(2).unwrap().title, "Airplane!");
        assert!(engine.find_movie(99).is_none());
    }
}
