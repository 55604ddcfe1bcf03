//! Query operations of the station gateway

use crate::schema::{
    auth_level_from_row, station_map, InstantaneousAveragesRow, PrecipitationAverageRow,
    PrecipitationSumRow, StationRow, TemperatureRangeRow,
};
use crate::{GatewayError, GatewayResult, StationGateway};
use meteo_core::{
    available_sensors, AuthLevel, AverageInstantaneousData, Credentials, Sensor, StationMap,
    TemperatureRange, Timestamp, NOT_AUTHENTICATED,
};
use tracing::{debug, instrument, warn};

impl StationGateway {
    /// Authorization level of the user with exactly these credentials.
    ///
    /// Matching is case-sensitive on both fields. Returns
    /// [`NOT_AUTHENTICATED`] when no user matches; unknown users and wrong
    /// passwords are not distinguished.
    #[instrument(skip(self, password))]
    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> GatewayResult<AuthLevel> {
        const METHOD: &str = "authenticate_user";

        let row = sqlx::query(
            r#"
            SELECT AuthLevel FROM USER
            WHERE Username = BINARY ? AND Password = BINARY ?
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GatewayError::from_sqlx(METHOD, e))?;

        let Some(row) = row else {
            debug!("No user matched the supplied credentials");
            return Ok(NOT_AUTHENTICATED);
        };

        let level = auth_level_from_row(&row).map_err(|raw| {
            warn!(%username, auth_level = %raw, "Stored auth level is not numerical");
            GatewayError::DataIntegrity {
                method: METHOD,
                reason: format!(
                    "Invalid auth_level for user: {username}. Auth_level is not numerical. Auth_level: {raw}"
                ),
            }
        })?;

        debug!(auth_level = level, "User authenticated");
        Ok(level)
    }

    /// [`authenticate_user`](Self::authenticate_user) for an untyped request
    /// body. Non-string credentials are rejected before any query is issued.
    #[instrument(skip_all)]
    pub async fn authenticate_credentials(
        &self,
        body: &serde_json::Value,
    ) -> GatewayResult<AuthLevel> {
        let creds = Credentials::from_json(body).map_err(|e| GatewayError::InvalidInput {
            method: "authenticate_user",
            reason: e.to_string(),
        })?;

        self.authenticate_user(&creds.username, &creds.password).await
    }

    /// All stations with their coordinates and last update
    #[instrument(skip(self))]
    pub async fn get_stations(&self) -> GatewayResult<StationMap> {
        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT Name, Latitude, Longitude, Altitude, LastUpdate
            FROM STATION
            ORDER BY Name
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| GatewayError::from_sqlx("get_stations", e))?;

        debug!("Retrieved {} stations", rows.len());
        Ok(station_map(rows))
    }

    /// Total precipitation of the buckets lying in the window.
    ///
    /// A bucket counts when it starts at or after `start_timestamp` and ends
    /// before `end_timestamp`. `None` when no bucket carries a value.
    #[instrument(skip(self))]
    pub async fn get_sum_precipitation_of_station_in_period(
        &self,
        station: &str,
        start_timestamp: Timestamp,
        end_timestamp: Timestamp,
    ) -> GatewayResult<Option<f64>> {
        let row = sqlx::query_as::<_, PrecipitationSumRow>(
            r#"
            SELECT SUM(Precipitation) AS Somma
            FROM PERIODIC_DATA
            WHERE StationName = ? AND StartTimestamp >= ? AND EndTimestamp < ?
            "#,
        )
        .bind(station)
        .bind(start_timestamp)
        .bind(end_timestamp)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GatewayError::from_sqlx("get_sum_precipitation_of_station_in_period", e))?;

        Ok(row.and_then(|r| r.sum))
    }

    /// Averages of the instantaneous readings in `[start_timestamp, end_timestamp)`
    #[instrument(skip(self))]
    pub async fn get_average_instantaneous_data_of_station_in_period(
        &self,
        station: &str,
        start_timestamp: Timestamp,
        end_timestamp: Timestamp,
    ) -> GatewayResult<AverageInstantaneousData> {
        let row = sqlx::query_as::<_, InstantaneousAveragesRow>(
            r#"
            SELECT AVG(Temperature) AS Temperature,
                   AVG(Humidity) AS Humidity,
                   AVG(WindSpeed) AS WindSpeed,
                   AVG(WindDirection) AS WindDirection
            FROM INSTANTANEOUS_DATA
            WHERE StationName = ? AND Timestamp >= ? AND Timestamp < ?
            "#,
        )
        .bind(station)
        .bind(start_timestamp)
        .bind(end_timestamp)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            GatewayError::from_sqlx("get_average_instantaneous_data_of_station_in_period", e)
        })?;

        Ok(row.map(AverageInstantaneousData::from).unwrap_or_default())
    }

    /// Sensors that have ever reported for the station, in catalogue order
    #[instrument(skip(self))]
    pub async fn get_sensors_per_station(&self, station: &str) -> GatewayResult<Vec<Sensor>> {
        const METHOD: &str = "get_sensors_per_station";

        let periodic = sqlx::query_as::<_, PrecipitationAverageRow>(
            r#"
            SELECT AVG(Precipitation) AS Precipitation
            FROM PERIODIC_DATA
            WHERE StationName = ?
            "#,
        )
        .bind(station)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GatewayError::from_sqlx(METHOD, e))?;

        let instantaneous = sqlx::query_as::<_, InstantaneousAveragesRow>(
            r#"
            SELECT AVG(Temperature) AS Temperature,
                   AVG(Humidity) AS Humidity,
                   AVG(WindSpeed) AS WindSpeed,
                   AVG(WindDirection) AS WindDirection
            FROM INSTANTANEOUS_DATA
            WHERE StationName = ?
            "#,
        )
        .bind(station)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GatewayError::from_sqlx(METHOD, e))?;

        let sensors = available_sensors(
            periodic.and_then(|r| r.precipitation),
            &instantaneous
                .map(AverageInstantaneousData::from)
                .unwrap_or_default(),
        );

        debug!("Station {} has {} sensors", station, sensors.len());
        Ok(sensors)
    }

    /// Dashboard labels of [`get_sensors_per_station`](Self::get_sensors_per_station)
    pub async fn get_sensor_labels_per_station(
        &self,
        station: &str,
    ) -> GatewayResult<Vec<&'static str>> {
        let sensors = self.get_sensors_per_station(station).await?;
        Ok(sensors.into_iter().map(Sensor::label).collect())
    }

    /// Lowest and highest temperature in `[start_timestamp, end_timestamp)`
    #[instrument(skip(self))]
    pub async fn get_max_min_temperature_of_station_in_period(
        &self,
        station: &str,
        start_timestamp: Timestamp,
        end_timestamp: Timestamp,
    ) -> GatewayResult<TemperatureRange> {
        let row = sqlx::query_as::<_, TemperatureRangeRow>(
            r#"
            SELECT MIN(Temperature) AS MinTemperature, MAX(Temperature) AS MaxTemperature
            FROM INSTANTANEOUS_DATA
            WHERE StationName = ? AND Timestamp >= ? AND Timestamp < ?
            "#,
        )
        .bind(station)
        .bind(start_timestamp)
        .bind(end_timestamp)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GatewayError::from_sqlx("get_max_min_temperature_of_station_in_period", e))?;

        Ok(row.map(TemperatureRange::from).unwrap_or_default())
    }
}
