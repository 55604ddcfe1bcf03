//! Result records for station and weather queries

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Timestamp type (Unix epoch seconds)
pub type Timestamp = i64;

/// Authorization level stored for a dashboard user
pub type AuthLevel = i32;

/// Returned by authentication when no user matches the credentials
pub const NOT_AUTHENTICATED: AuthLevel = -1;

/// Station metadata keyed by station name in [`StationMap`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,

    /// Unix timestamp of the last datum received from the station
    pub last_update: Timestamp,
}

impl StationInfo {
    /// Last update as a UTC datetime, `None` if out of chrono's range
    pub fn last_update_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_update, 0)
    }
}

/// All stations, in the order the store sorted them by name.
///
/// Insertion order is kept so the database collation decides the order.
pub type StationMap = IndexMap<String, StationInfo>;

/// Averages of instantaneous readings over a period.
///
/// Each field is computed independently: a field is `None` when no row in
/// the period carries a value for it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AverageInstantaneousData {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
}

/// Temperature extremes over a period
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureRange {
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}
