use std::path::PathBuf;

use reelmatch_api::{
    engine::{dataset, RecommendationEngine},
    error::AppError,
    models::UserPreferences,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/movies.csv")
}

fn engine() -> RecommendationEngine {
    RecommendationEngine::from_path(fixture_path()).unwrap()
}

fn prefs(genres: &str, actors: &str, director: &str) -> UserPreferences {
    UserPreferences {
        genres: genres.to_string(),
        actors: actors.to_string(),
        director: director.to_string(),
    }
}

fn top_ids(engine: &RecommendationEngine, prefs: &UserPreferences, count: usize) -> Vec<u64> {
    engine
        .recommend(prefs, count)
        .iter()
        .map(|rec| rec.movie.id)
        .collect()
}

#[test]
fn test_fixture_loads_in_file_order() {
    let catalog = dataset::load(fixture_path()).unwrap();
    let ids: Vec<u64> = catalog.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![135397, 76341, 286217, 150540, 168259, 11, 194662, 9999]);

    let jurassic = catalog.get(0).unwrap();
    assert_eq!(jurassic.genres, "Action Adventure ScienceFiction Thriller");
    assert_eq!(jurassic.cast, "Chris Pratt Bryce Dallas Howard Irrfan Khan");

    let untitled = catalog.find_by_id(9999).unwrap();
    assert_eq!(untitled.combined_features.trim(), "");
}

#[test]
fn test_missing_dataset_is_fatal() {
    let result = RecommendationEngine::from_path("does/not/exist.csv");
    assert!(matches!(result, Err(AppError::DatasetUnavailable(_))));
}

#[test]
fn test_director_preference() {
    let engine = engine();
    assert_eq!(top_ids(&engine, &prefs("", "", "George Miller"), 1), vec![76341]);
}

#[test]
fn test_genre_and_actor_preference() {
    let engine = engine();
    let ids = top_ids(&engine, &prefs("ScienceFiction", "Harrison Ford", ""), 3);
    assert_eq!(ids[0], 11);
}

#[test]
fn test_unicode_director_matches() {
    let engine = engine();
    let ids = top_ids(&engine, &prefs("", "", "Alejandro González Iñárritu"), 1);
    assert_eq!(ids, vec![194662]);
}

#[test]
fn test_movie_features_rank_that_movie_first() {
    let engine = engine();
    for movie in engine.catalog().iter().filter(|m| !m.combined_features.trim().is_empty()) {
        let ranked = engine.rank_text(&movie.combined_features);
        let top = engine.catalog().get(ranked[0].row).unwrap();
        assert_eq!(top.id, movie.id, "{} should rank itself first", movie.title);
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_empty_preferences_return_catalog_order() {
    let engine = engine();
    assert_eq!(
        top_ids(&engine, &UserPreferences::new(), 3),
        vec![135397, 76341, 286217]
    );
}

#[test]
fn test_unknown_terms_behave_like_empty_preferences() {
    let engine = engine();
    assert_eq!(
        top_ids(&engine, &prefs("", "Nobody Anybody", "Zzyzx"), 2),
        vec![135397, 76341]
    );
}

#[test]
fn test_count_beyond_catalog_returns_everything() {
    let engine = engine();
    let ids = top_ids(&engine, &prefs("Comedy", "", ""), 100);
    assert_eq!(ids.len(), engine.catalog().len());
}

#[test]
fn test_recommendations_are_repeatable() {
    let engine = engine();
    let preferences = prefs("Action Thriller", "Vin Diesel", "");
    assert_eq!(
        top_ids(&engine, &preferences, 5),
        top_ids(&engine, &preferences, 5)
    );
}

#[test]
fn test_refitting_gives_same_counts() {
    let first = engine();
    let second = engine();

    assert_eq!(first.vocabulary().len(), second.vocabulary().len());
    for row in 0..first.matrix().rows() {
        for &(column, count) in first.matrix().row(row).unwrap().entries() {
            let term = first.vocabulary().term(column).unwrap();
            let other_column = second.vocabulary().column(term).unwrap();
            assert_eq!(second.matrix().row(row).unwrap().get(other_column), count);
        }
    }
}
