//! Gateway construction and connection pool management

use crate::{GatewayError, GatewayResult};
use meteo_config::GatewayConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default MySQL/MariaDB port
pub const DEFAULT_PORT: u16 = 3306;

/// Pool sizing
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Data access facade for the dashboard.
///
/// Clones share the same pool. Connections are opened lazily by the first
/// query that needs one, so constructing a gateway never touches the network.
/// Must be constructed inside a Tokio runtime: the pool spawns its reaper task.
#[derive(Clone)]
pub struct StationGateway {
    pool: MySqlPool,
    closed: Arc<AtomicBool>,
}

impl StationGateway {
    /// Gateway on the default port with a pool of 10 connections
    pub fn new(host: &str, user: &str, password: &str, database: &str) -> Self {
        let opts = connect_options(host, DEFAULT_PORT, user, Some(password), database);
        Self::with_options(opts, PoolSettings::default())
    }

    /// Gateway with custom connect options and pool sizing
    pub fn with_options(opts: MySqlConnectOptions, settings: PoolSettings) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_lazy_with(opts);

        debug!(
            max_connections = settings.max_connections,
            "Created lazy connection pool"
        );

        Self {
            pool,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        // An empty password means none is sent
        let password = Some(config.password.as_str()).filter(|p| !p.is_empty());
        let opts = connect_options(
            &config.host,
            config.port,
            &config.user,
            password,
            &config.database,
        );

        let settings = PoolSettings {
            max_connections: config.max_connections,
            acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
        };

        Self::with_options(opts, settings)
    }

    /// Get reference to underlying pool for direct queries
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Test the database connection
    #[instrument(skip(self))]
    pub async fn ping(&self) -> GatewayResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| GatewayError::from_sqlx("ping", e))?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to come back.
    ///
    /// Only the first call on a gateway (or any of its clones) closes the
    /// pool; later calls fail with [`GatewayError::PoolShutdown`].
    #[instrument(skip(self))]
    pub async fn close(&self) -> GatewayResult<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(GatewayError::PoolShutdown {
                method: "close",
                reason: "connection pool already closed".to_string(),
            });
        }

        self.pool.close().await;
        info!("Connection pool closed");
        Ok(())
    }
}

fn connect_options(
    host: &str,
    port: u16,
    user: &str,
    password: Option<&str>,
    database: &str,
) -> MySqlConnectOptions {
    let opts = MySqlConnectOptions::new()
        .host(host)
        .port(port)
        .database(database)
        .username(user);

    match password {
        Some(password) => opts.password(password),
        None => opts,
    }
}
