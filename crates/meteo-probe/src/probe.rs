//! Station probing: exercises every gateway query and reports the results

use anyhow::{Context, Result};
use meteo_core::{StationInfo, Timestamp};
use meteo_db::StationGateway;
use tracing::{info, warn};

/// Summary of one station over the probe window
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    pub name: String,
    pub info: StationInfo,
    pub sensors: Vec<&'static str>,
    pub precipitation: Option<f64>,
    pub avg_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

pub struct Probe {
    gateway: StationGateway,
}

impl Probe {
    pub fn new(gateway: StationGateway) -> Self {
        Self { gateway }
    }

    /// Report on every station (or only `only`) for `[start, end)`
    pub async fn run(
        &self,
        only: Option<&str>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<StationReport>> {
        self.gateway.ping().await.context("Database ping failed")?;
        info!("Database connection verified");

        let stations = self
            .gateway
            .get_stations()
            .await
            .context("Failed to list stations")?;
        info!("Found {} stations", stations.len());

        if let Some(name) = only {
            if !stations.contains_key(name) {
                warn!(station = name, "Requested station is not registered");
            }
        }

        let mut reports = Vec::new();
        for (name, info) in stations {
            if only.is_some_and(|o| o != name) {
                continue;
            }
            let report = self.report(name, info, start, end).await?;
            info!(
                station = %report.name,
                sensors = ?report.sensors,
                precipitation = ?report.precipitation,
                avg_temperature = ?report.avg_temperature,
                min_temperature = ?report.min_temperature,
                max_temperature = ?report.max_temperature,
                "Station report"
            );
            reports.push(report);
        }

        Ok(reports)
    }

    async fn report(
        &self,
        name: String,
        info: StationInfo,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<StationReport> {
        let sensors = self.gateway.get_sensor_labels_per_station(&name).await?;
        let precipitation = self
            .gateway
            .get_sum_precipitation_of_station_in_period(&name, start, end)
            .await?;
        let averages = self
            .gateway
            .get_average_instantaneous_data_of_station_in_period(&name, start, end)
            .await?;
        let range = self
            .gateway
            .get_max_min_temperature_of_station_in_period(&name, start, end)
            .await?;

        Ok(StationReport {
            name,
            info,
            sensors,
            precipitation,
            avg_temperature: averages.temperature,
            min_temperature: range.min_temperature,
            max_temperature: range.max_temperature,
        })
    }
}

/// Probe window `[now - window_secs, now)`
pub fn window_ending_at(now: Timestamp, window_secs: i64) -> (Timestamp, Timestamp) {
    (now.saturating_sub(window_secs.max(0)), now)
}
