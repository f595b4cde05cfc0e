use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use hewan_relay::config::{AppConfig, StoreConfig};
use hewan_relay::services::store::{AnimalStore, PgAnimalStore, SupabaseStore};
use hewan_relay::services::telegram::TelegramBot;
use hewan_relay::{db, routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hewan_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Incomplete configuration, check TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_IDS and the record store settings");
            std::process::exit(1);
        }
    };

    let store = build_store(&config.store).await?;
    let notifier = Arc::new(TelegramBot::new(
        &config.telegram_api_url,
        &config.telegram_bot_token,
    ));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!(
        host = %addr,
        recipients = config.telegram_chat_ids.len(),
        "Starting hewan relay"
    );

    let app = routes::router(AppState::new(store, notifier, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_store(store: &StoreConfig) -> anyhow::Result<Arc<dyn AnimalStore>> {
    match store {
        StoreConfig::Rest { url, key } => {
            tracing::info!(url = %url, "Using hosted REST record store");
            Ok(Arc::new(SupabaseStore::new(url, key)))
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::create_pool(database_url, *max_connections)
                .await
                .context("failed to connect to database")?;
            db::migrate(&pool).await.context("failed to run migrations")?;
            tracing::info!(max_connections, "Using direct Postgres record store");
            Ok(Arc::new(PgAnimalStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
