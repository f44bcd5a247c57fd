//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::io;

use actix_web::dev::ServerHandle;
use actix_web::web;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use gatehouse::inbound::http::health::HealthState;
use gatehouse::outbound::persistence::{DbPool, run_pending_migrations};
use gatehouse::settings::AppSettings;
use server::{ServerConfig, create_server};

const EPHEMERAL_SECRET_BYTES: usize = 32;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|e| io::Error::other(format!("invalid settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, signing_secret(&settings)?)
        .with_token_ttl(token_ttl)
        .with_argon2(settings.argon2());
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(stop_on_signal(server.handle(), health_state));

    info!(%bind_addr, "gatehouse listening");
    server.await?;
    info!("gatehouse stopped");
    Ok(())
}

/// Open the pool and apply migrations when a database URL is configured.
async fn connect_database(settings: &AppSettings) -> io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        return Ok(None);
    };

    run_pending_migrations(url)
        .await
        .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;
    let pool = DbPool::new(settings.pool_config(url))
        .await
        .map_err(|e| io::Error::other(format!("database pool setup failed: {e}")))?;
    Ok(Some(pool))
}

/// Token signing secret; debug builds fall back to a random per-process key.
fn signing_secret(settings: &AppSettings) -> io::Result<Zeroizing<Vec<u8>>> {
    if let Some(secret) = settings.jwt_secret() {
        return Ok(Zeroizing::new(secret.as_bytes().to_vec()));
    }
    if cfg!(debug_assertions) {
        warn!("GATEHOUSE_JWT_SECRET not set; using an ephemeral signing key (dev only)");
        let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_BYTES]);
        OsRng.fill_bytes(&mut secret);
        return Ok(secret);
    }
    Err(io::Error::other(
        "GATEHOUSE_JWT_SECRET must be set in release builds",
    ))
}

/// Wait for SIGINT or SIGTERM, fail liveness, then drain the server.
async fn stop_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    if let Err(error) = shutdown_signal().await {
        warn!(%error, "failed to listen for shutdown signals");
        return;
    }
    info!("shutdown signal received; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}
