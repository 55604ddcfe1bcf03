//! Shared harness for gateway integration tests
//!
//! These tests need a MySQL or MariaDB server. Each test gets its own
//! freshly created database with the dashboard schema.
//!
//! Usage:
//! - Set TEST_DATABASE_URL (default: mysql://root@localhost)
//! - Run: cargo test -p meteo-db -- --ignored

pub mod test_db;

/// Server URL without a database path
pub fn test_server_url() -> String {
    std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "mysql://root@localhost".to_string())
}
