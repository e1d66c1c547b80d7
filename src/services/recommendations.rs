use crate::{
    engine::RecommendationEngine,
    error::{AppError, AppResult},
    models::{Recommendation, UserPreferences},
};

/// Ranked recommendations for one request
#[derive(Debug)]
pub struct RecommendationPage<'a> {
    /// False when nothing in the preferences matched the catalog vocabulary
    pub personalized: bool,
    pub recommendations: Vec<Recommendation<'a>>,
}

/// Generates the top `count` catalog movies for a preferences snapshot
///
/// Preferences that share no terms with the catalog produce the catalog in
/// its original order with `personalized` unset, so callers can present the
/// list as unpersonalized instead of treating it as an error.
pub fn get_recommendations<'a>(
    engine: &'a RecommendationEngine,
    preferences: &UserPreferences,
    count: usize,
) -> AppResult<RecommendationPage<'a>> {
    if count == 0 {
        return Err(AppError::InvalidInput(
            "Recommendation count must be positive".to_string(),
        ));
    }

    let recommendations = engine.recommend(preferences, count);
    let personalized = recommendations
        .first()
        .map(|top| top.score > 0.0)
        .unwrap_or(false);

    tracing::info!(
        requested = count,
        returned = recommendations.len(),
        personalized = personalized,
        "Recommendations computed"
    );

    Ok(RecommendationPage {
        personalized,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Catalog;
    use crate::models::{MovieRecord, RawMovieRow};

    fn engine() -> RecommendationEngine {
        let rows = vec![(10, "Action", "A B C"), (20, "Comedy", "D E F")];
        let movies = rows
            .into_iter()
            .map(|(id, genres, cast)| {
                MovieRecord::from(RawMovieRow {
                    id,
                    original_title: Some(format!("Movie {}", id)),
                    genres: Some(genres.to_string()),
                    cast: Some(cast.to_string()),
                    director: None,
                    keywords: None,
                })
            })
            .collect();
        RecommendationEngine::new(Catalog::new(movies))
    }

    #[test]
    fn test_action_preference_ranks_action_movie_first() {
        let engine = engine();
        let prefs = UserPreferences {
            genres: "Action".to_string(),
            ..UserPreferences::default()
        };

        let page = get_recommendations(&engine, &prefs, 1).unwrap();
        assert!(page.personalized);
        assert_eq!(page.recommendations.len(), 1);
        assert_eq!(page.recommendations[0].movie.id, 10);
    }

    #[test]
    fn test_empty_preferences_are_not_personalized() {
        let engine = engine();
        let page = get_recommendations(&engine, &UserPreferences::new(), 5).unwrap();

        assert!(!page.personalized);
        let ids: Vec<u64> = page.recommendations.iter().map(|r| r.movie.id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_zero_count_rejected() {
        let engine = engine();
        let result = get_recommendations(&engine, &UserPreferences::new(), 0);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
