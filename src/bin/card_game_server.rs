// src/bin/card_game_server.rs

use std::sync::Arc;

use anyhow::Result;

use card_game_engine::api;
use card_game_engine::engine::GameManager;
use card_game_engine::infra::{AnyGameStore, AppConfig, DeterministicRng, FileGameStore, InMemoryGameStore};

#[tokio::main]
async fn main() -> Result<()> {
    // .env не обязателен: без него берём обычное окружение.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;

    let store = match &config.data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using file store");
            AnyGameStore::File(FileGameStore::open(dir).await?)
        }
        None => {
            tracing::info!("using in-memory store");
            AnyGameStore::Memory(InMemoryGameStore::new())
        }
    };

    let rng = match config.rng_seed {
        Some(seed) => DeterministicRng::from_seed(seed),
        None => DeterministicRng::from_entropy(),
    };

    let manager = Arc::new(GameManager::new(store, rng).with_timeout(config.store_timeout));
    let app = api::router(manager);

    tracing::info!(addr = %config.addr, "starting server");

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("received shutdown signal");
}
