use crate::{
    engine::RecommendationEngine,
    error::{AppError, AppResult},
    models::MovieRecord,
};

/// Service function for title search
///
/// Case-insensitive substring match over catalog titles, in catalog order.
pub fn search_titles<'a>(
    engine: &'a RecommendationEngine,
    query: &str,
) -> AppResult<Vec<&'a MovieRecord>> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let results = engine.search_titles(query);
    tracing::info!(query = %query, results = results.len(), "Title search completed");

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Catalog;

    #[test]
    fn test_blank_query_rejected() {
        let engine = RecommendationEngine::new(Catalog::default());
        assert!(matches!(
            search_titles(&engine, "   "),
            Err(AppError::InvalidInput(_))
        ));
    }
}
