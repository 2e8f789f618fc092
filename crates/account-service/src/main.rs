use account_service::config::Config;
use account_service::crypto::BcryptHasher;
use account_service::repositories::accounts::PgAccountStore;
use account_service::repositories::memory::MemoryAccountStore;
use account_service::repositories::AccountStore;
use account_service::routes::{self, AppState};
use account_service::services::AccountService;
use common::secret::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Account Service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(bcrypt_cost = config.bcrypt_cost, "Configuration loaded successfully");

    let store: Arc<dyn AccountStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url.expose_secret())
                .await
                .map_err(|e| {
                    error!("Failed to connect to database: {}", e);
                    e
                })?;

            sqlx::migrate!("../../migrations")
                .run(&db_pool)
                .await
                .map_err(|e| {
                    error!("Failed to run database migrations: {}", e);
                    e
                })?;

            info!("Database connection established");
            Arc::new(PgAccountStore::new(db_pool))
        }
        None => {
            warn!("DATABASE_URL not set; accounts are kept in memory and lost on restart");
            Arc::new(MemoryAccountStore::new())
        }
    };

    let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost)?);

    let state = Arc::new(AppState {
        accounts: AccountService::new(store, hasher),
    });

    let metrics_handle = routes::init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Account Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
