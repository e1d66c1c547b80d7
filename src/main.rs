use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelmatch_api::{
    api::{create_router, AppState, Paging},
    config::Config,
    engine::RecommendationEngine,
    services::TmdbProvider,
    store::{Argon2Hasher, JsonFileUserStore, SessionStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The engine cannot run without a catalog
    let engine = Arc::new(RecommendationEngine::from_path(&config.dataset_path)?);

    let users =
        JsonFileUserStore::open(&config.user_store_path, Arc::new(Argon2Hasher::new())).await?;

    let metadata = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
        Duration::from_secs(config.metadata_timeout_secs),
    )?;

    let paging = Paging {
        default_page_size: config.default_page_size,
        page_step: config.page_step,
    };

    let session_ttl = chrono::Duration::try_seconds(config.session_ttl_secs)
        .ok_or_else(|| anyhow::anyhow!("SESSION_TTL_SECS out of range"))?;
    let sessions = SessionStore::with_ttl(session_ttl);
    let state = AppState::new(engine, Arc::new(users), Arc::new(metadata), paging)
        .with_sessions(sessions);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
