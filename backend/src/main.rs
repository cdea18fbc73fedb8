//! Backend entry-point: loads settings, applies migrations, and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodshare::inbound::http::health::HealthState;
use foodshare::outbound::persistence::{DbPool, run_pending_migrations};
use foodshare::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let pool_config = settings.pool_config()?;
    let bind_addr = settings.bind_addr()?;
    let token_secret = settings.token_secret()?;
    let mail = settings.mail_delivery()?;

    let applied = run_pending_migrations(pool_config.database_url())
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool, token_secret, mail);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
