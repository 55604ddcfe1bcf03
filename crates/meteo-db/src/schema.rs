//! Row types for the dashboard's MySQL schema
//!
//! Column names are PascalCase in the database and must not drift: the
//! ingestion service writes the same tables. Measurement columns are
//! expected to be DOUBLE; any other type surfaces as a data integrity error.

use meteo_core::{AuthLevel, AverageInstantaneousData, StationInfo, StationMap, TemperatureRange};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};

/// `STATION` row
#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    #[sqlx(rename = "Name")]
    pub name: String,

    #[sqlx(rename = "Latitude")]
    pub latitude: f64,

    #[sqlx(rename = "Longitude")]
    pub longitude: f64,

    #[sqlx(rename = "Altitude")]
    pub altitude: f64,

    /// Unix epoch seconds
    #[sqlx(rename = "LastUpdate")]
    pub last_update: i64,
}

impl StationRow {
    pub fn into_entry(self) -> (String, StationInfo) {
        (
            self.name,
            StationInfo {
                latitude: self.latitude,
                longitude: self.longitude,
                altitude: self.altitude,
                last_update: self.last_update,
            },
        )
    }
}

/// Collect station rows, keeping the order the query returned them in
pub fn station_map(rows: Vec<StationRow>) -> StationMap {
    rows.into_iter().map(StationRow::into_entry).collect()
}

/// `SUM(Precipitation)` over `PERIODIC_DATA`
#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationSumRow {
    #[sqlx(rename = "Somma")]
    pub sum: Option<f64>,
}

/// `AVG(Precipitation)` over `PERIODIC_DATA`
#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationAverageRow {
    #[sqlx(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

/// AVG of the four instantaneous fields over `INSTANTANEOUS_DATA`
#[derive(Debug, Clone, FromRow)]
pub struct InstantaneousAveragesRow {
    #[sqlx(rename = "Temperature")]
    pub temperature: Option<f64>,

    #[sqlx(rename = "Humidity")]
    pub humidity: Option<f64>,

    #[sqlx(rename = "WindSpeed")]
    pub wind_speed: Option<f64>,

    #[sqlx(rename = "WindDirection")]
    pub wind_direction: Option<f64>,
}

impl From<InstantaneousAveragesRow> for AverageInstantaneousData {
    fn from(row: InstantaneousAveragesRow) -> Self {
        Self {
            temperature: row.temperature,
            humidity: row.humidity,
            wind_speed: row.wind_speed,
            wind_direction: row.wind_direction,
        }
    }
}

/// MIN/MAX temperature over `INSTANTANEOUS_DATA`
#[derive(Debug, Clone, FromRow)]
pub struct TemperatureRangeRow {
    #[sqlx(rename = "MinTemperature")]
    pub min_temperature: Option<f64>,

    #[sqlx(rename = "MaxTemperature")]
    pub max_temperature: Option<f64>,
}

impl From<TemperatureRangeRow> for TemperatureRange {
    fn from(row: TemperatureRangeRow) -> Self {
        Self {
            min_temperature: row.min_temperature,
            max_temperature: row.max_temperature,
        }
    }
}

/// Read `AuthLevel` from a `USER` row.
///
/// Older deployments store the level as text, so integer columns and
/// integer strings are both accepted. The error carries the raw value for
/// the caller's message.
pub fn auth_level_from_row(row: &MySqlRow) -> Result<AuthLevel, String> {
    if let Ok(level) = row.try_get::<i64, _>(columns::AUTH_LEVEL) {
        return AuthLevel::try_from(level).map_err(|_| level.to_string());
    }
    if let Ok(level) = row.try_get::<u64, _>(columns::AUTH_LEVEL) {
        return AuthLevel::try_from(level).map_err(|_| level.to_string());
    }

    match row.try_get::<Option<String>, _>(columns::AUTH_LEVEL) {
        Ok(Some(raw)) => parse_auth_level(&raw).ok_or(raw),
        Ok(None) => Err("NULL".to_string()),
        Err(_) => Err("<undecodable>".to_string()),
    }
}

/// Parse the leading integer of a textual auth level.
///
/// Leading whitespace and a sign are allowed and anything after the digits
/// is ignored, so `"2.5"` reads as 2. `None` when there are no leading
/// digits or the value does not fit an [`AuthLevel`].
pub fn parse_auth_level(raw: &str) -> Option<AuthLevel> {
    let s = raw.trim_start();
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    let sign_len = s.len() - unsigned.len();
    let digits = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }

    s[..sign_len + digits].parse().ok()
}

/// Column names read outside of `FromRow` derives
pub mod columns {
    pub const AUTH_LEVEL: &str = "AuthLevel";
}
