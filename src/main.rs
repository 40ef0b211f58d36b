use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use nexus_api::api::{create_router, AppState};
use nexus_api::config::Config;
use nexus_api::db::{create_redis_client, Cache, RedisStore};
use nexus_api::services::{Catalogue, TmdbClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, _cache_writer) = Cache::new(Arc::new(RedisStore::new(redis_client))).await;

    let tmdb = TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )?;

    let catalogue = Catalogue::new(Arc::new(tmdb), cache);
    let state = AppState::new(
        catalogue,
        config.image_base_url.clone(),
        config.trending_pages,
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
