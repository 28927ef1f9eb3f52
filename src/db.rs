//! Connection pool construction from a resolved descriptor.
//!
//! The descriptor's normalized URL is the single source of truth: sqlite
//! URLs (including the local fallback, which carries `mode=rwc` so the file
//! is created on first open) and Postgres URLs both go through sqlx's `Any`
//! driver, keeping deployment differences inside the URL string. Schema
//! management lives elsewhere.

use anyhow::{Context, Result};
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use sqlx::AnyPool;

use crate::config::ConnectionDescriptor;

pub async fn connect(connection: &ConnectionDescriptor) -> Result<AnyPool> {
    // Registers the drivers compiled into this binary (sqlite, postgres).
    install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(5)
        .connect(&connection.normalized_url)
        .await
        .with_context(|| format!("Failed to connect to {}", connection.normalized_url))?;

    Ok(pool)
}

/// Liveness probe used by `portico ping`.
pub async fn ping(pool: &AnyPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
