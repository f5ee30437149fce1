use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use powerline_admin_api::app::create_app;
use powerline_admin_api::config::Config;
use powerline_admin_api::middleware::{init_metrics, logging::init_logging};
use powerline_admin_api::services::AdminAuthService;

use persistence::repositories::AdminSettingsRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging and metrics
    init_logging(&config.logging);
    init_metrics();

    info!("Starting Powerline admin API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let pool = persistence::db::create_pool(&config.database).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/migrations").run(&pool).await?;
    info!("Migrations completed");

    // Provision the admin credential on first boot
    AdminAuthService::new(AdminSettingsRepository::new(pool.clone()))
        .provision(&config.admin.initial_passcode)
        .await?;

    // Build application
    let addr = config.socket_addr();
    let app = create_app(config, pool);

    // Start server
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
