//! Station data gateway over the dashboard's MySQL/MariaDB schema
//!
//! Read-only: the schema is owned by the ingestion side, no migrations
//! are run from here.

pub mod client;
pub mod queries;
pub mod schema;

pub use client::*;
pub use schema::*;

use thiserror::Error;

/// Failure of a gateway operation, tagged with the operation that raised it
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Database {method} method. {reason}")]
    InvalidInput {
        method: &'static str,
        reason: String,
    },

    #[error("Database {method} method. {reason}")]
    DataIntegrity {
        method: &'static str,
        reason: String,
    },

    #[error("Database {method} method. {source}")]
    QueryExecution {
        method: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database {method} method. {reason}")]
    PoolShutdown {
        method: &'static str,
        reason: String,
    },
}

impl GatewayError {
    /// Classify a driver error raised by `method`.
    ///
    /// Rows that cannot be decoded into the expected record are data
    /// integrity problems; everything else is an execution failure.
    pub fn from_sqlx(method: &'static str, err: sqlx::Error) -> Self {
        tracing::warn!(method, error = %err, "Query failed");

        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_) => GatewayError::DataIntegrity {
                method,
                reason: err.to_string(),
            },
            source => GatewayError::QueryExecution { method, source },
        }
    }

    /// Name of the gateway operation that failed
    pub fn method(&self) -> &'static str {
        match self {
            GatewayError::InvalidInput { method, .. }
            | GatewayError::DataIntegrity { method, .. }
            | GatewayError::QueryExecution { method, .. }
            | GatewayError::PoolShutdown { method, .. } => method,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
