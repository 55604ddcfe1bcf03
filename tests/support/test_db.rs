//! Test database management for gateway integration tests

use anyhow::{Context, Result};
use meteo_db::{PoolSettings, StationGateway};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;

/// Test database manager
pub struct TestDb {
    pool: MySqlPool,
    db_url: String,
}

impl TestDb {
    /// Create a fresh, empty database named after the test
    pub async fn new(base_url: &str, test_name: &str) -> Result<Self> {
        let db_name = format!("meteo_test_{}", test_name.replace('-', "_"));

        // Connect to the server without a database
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(base_url)
            .await
            .context("Failed to connect to MySQL")?;

        sqlx::query(&format!("DROP DATABASE IF EXISTS {}", db_name))
            .execute(&pool)
            .await
            .context("Failed to drop test database")?;

        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&pool)
            .await
            .context("Failed to create test database")?;

        pool.close().await;

        let db_url = format!("{}/{}", base_url.trim_end_matches('/'), db_name);
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&db_url)
            .await
            .context("Failed to connect to test database")?;

        let test_db = Self { pool, db_url };
        test_db.init_schema(meteo_schema()).await?;
        Ok(test_db)
    }

    /// Gateway pointed at this database
    pub fn gateway(&self) -> Result<StationGateway> {
        let opts = MySqlConnectOptions::from_str(&self.db_url)
            .with_context(|| format!("Invalid test database URL: {}", self.db_url))?;
        Ok(StationGateway::with_options(opts, PoolSettings::default()))
    }

    /// Get pool reference
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn init_schema(&self, schema_sql: &str) -> Result<()> {
        for statement in schema_sql.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                sqlx::query(statement)
                    .execute(&self.pool)
                    .await
                    .with_context(|| format!("Failed to execute: {}", statement))?;
            }
        }

        Ok(())
    }

    pub async fn insert_user(&self, username: &str, password: &str, auth_level: &str) -> Result<()> {
        sqlx::query("INSERT INTO USER (Username, Password, AuthLevel) VALUES (?, ?, ?)")
            .bind(username)
            .bind(password)
            .bind(auth_level)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_station(
        &self,
        name: &str,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        last_update: i64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO STATION (Name, Latitude, Longitude, Altitude, LastUpdate) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(altitude)
        .bind(last_update)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_periodic(
        &self,
        station: &str,
        start: i64,
        end: i64,
        precipitation: Option<f64>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO PERIODIC_DATA (StationName, StartTimestamp, EndTimestamp, Precipitation) VALUES (?, ?, ?, ?)",
        )
        .bind(station)
        .bind(start)
        .bind(end)
        .bind(precipitation)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_instantaneous(
        &self,
        station: &str,
        timestamp: i64,
        reading: Reading,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO INSTANTANEOUS_DATA
                (StationName, Timestamp, Temperature, Humidity, WindSpeed, WindDirection)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(station)
        .bind(timestamp)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.wind_speed)
        .bind(reading.wind_direction)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get row count for a table
    pub async fn count_rows(&self, table: &str) -> Result<i64> {
        let row = sqlx::query(&format!("SELECT COUNT(*) as count FROM {}", table))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }

    pub async fn clear_readings(&self) -> Result<()> {
        for table in ["PERIODIC_DATA", "INSTANTANEOUS_DATA"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

/// One row of instantaneous readings
#[derive(Debug, Clone, Copy, Default)]
pub struct Reading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
}

impl Reading {
    pub fn temperature(value: f64) -> Self {
        Self {
            temperature: Some(value),
            ..Default::default()
        }
    }
}

/// Dashboard schema as created by the ingestion service.
///
/// AuthLevel is textual here so tests can store malformed levels.
pub fn meteo_schema() -> &'static str {
    r#"
    CREATE TABLE USER (
        Username VARCHAR(64) NOT NULL PRIMARY KEY,
        Password VARCHAR(128) NOT NULL,
        AuthLevel VARCHAR(16)
    );

    CREATE TABLE STATION (
        Name VARCHAR(64) NOT NULL PRIMARY KEY,
        Latitude DOUBLE NOT NULL,
        Longitude DOUBLE NOT NULL,
        Altitude DOUBLE NOT NULL,
        LastUpdate BIGINT NOT NULL
    );

    CREATE TABLE PERIODIC_DATA (
        StationName VARCHAR(64) NOT NULL,
        StartTimestamp BIGINT NOT NULL,
        EndTimestamp BIGINT NOT NULL,
        Precipitation DOUBLE,
        PRIMARY KEY (StationName, StartTimestamp),
        FOREIGN KEY (StationName) REFERENCES STATION (Name)
    );

    CREATE TABLE INSTANTANEOUS_DATA (
        StationName VARCHAR(64) NOT NULL,
        Timestamp BIGINT NOT NULL,
        Temperature DOUBLE,
        Humidity DOUBLE,
        WindSpeed DOUBLE,
        WindDirection DOUBLE,
        PRIMARY KEY (StationName, Timestamp),
        FOREIGN KEY (StationName) REFERENCES STATION (Name)
    )
    "#
}
