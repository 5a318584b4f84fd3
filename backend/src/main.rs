//! Backend entry-point: loads settings, prepares persistence and serves the
//! marketplace REST API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::inbound::http::health::HealthState;
use marketplace::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use marketplace::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};
#[cfg(feature = "metrics")]
use server::{build_metrics, initialize_metrics};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr)
        .with_lists_empty_as_ok(settings.lists_empty_as_ok);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations {
            run_pending_migrations(&database_url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(build_metrics));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "marketplace backend listening");
    server.await
}
