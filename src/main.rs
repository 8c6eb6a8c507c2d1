use std::net::SocketAddr;
use std::sync::Arc;

use medibook::api::{self, AppState};
use medibook::auth::jwt::JwtService;
use medibook::config::CONFIG;
use medibook::core::services::ClinicService;
use medibook::infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(config = ?*CONFIG, "starting medibook");
    if CONFIG.uses_default_secret() {
        warn!("JWT_SECRET is not set, signing sessions with the built-in default secret");
    }

    // Initialize storage, logging and token service
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let jwt_service = JwtService::new(&CONFIG.jwt_secret, chrono::Duration::days(CONFIG.session_ttl_days));
    let service = Arc::new(ClinicService::new(storage, logging, jwt_service, CONFIG.bcrypt_cost));

    let state = AppState {
        service,
        cookie_secure: CONFIG.cookie_secure,
    };
    let app = api::with_http_layers(api::api_routes(state), &CONFIG.client_origin)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
