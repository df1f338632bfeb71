//! Signup wizard - entry point.

use registration_client::RegistrationClient;
use signup_store::{EnvironmentConfig, SignupStore, SnapshotStore};
use signup_wizard::{Config, Wizard};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting signup wizard");

    // Select snapshot storage
    let snapshots = if config.storage.persist {
        SnapshotStore::file(config.storage.path.clone())
    } else {
        info!("Persistence disabled, using in-memory state");
        SnapshotStore::memory()
    };

    // Hydrate the store
    let environment = EnvironmentConfig {
        api_base_url: config.api.base_url.clone(),
        is_production: config.api.is_production,
    };
    let store = SignupStore::open(snapshots, environment).await;

    // Initialize the backend client
    let client = match RegistrationClient::new(&config.api.base_url) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create registration client: {}", e);
            std::process::exit(1);
        }
    };

    if !client.health_check().await {
        info!("Registration backend did not answer the health probe; continuing anyway");
    }

    // Run the wizard
    if let Err(e) = Wizard::new(store, client).run().await {
        error!("Wizard error: {}", e);
        std::process::exit(1);
    }
}
