pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::store::AnimalStore;
use services::telegram::Notifier;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnimalStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<config::AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AnimalStore>,
        notifier: Arc<dyn Notifier>,
        config: config::AppConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config: Arc::new(config),
        }
    }
}
