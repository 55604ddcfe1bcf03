//! Meteo probe - connectivity and data check for the station gateway
//!
//! Connects with the dashboard's gateway configuration, then logs every
//! station with its sensors and a summary of the recent window.

mod config;
mod probe;

use anyhow::Result;
use tracing::{error, info};

use meteo_db::StationGateway;
use meteo_obs::LogFormat;

use crate::config::ProbeConfig;
use crate::probe::{window_ending_at, Probe};

#[tokio::main]
async fn main() -> Result<()> {
    meteo_obs::init("meteo-probe", LogFormat::from_env());

    info!("Starting meteo probe");

    let config = ProbeConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let gateway = StationGateway::from_config(&config.gateway);

    let now = chrono::Utc::now().timestamp();
    let (start, end) = window_ending_at(now, config.window_secs);

    let result = Probe::new(gateway.clone())
        .run(config.station.as_deref(), start, end)
        .await;

    gateway.close().await?;

    match result {
        Ok(reports) => {
            info!("Probed {} stations", reports.len());
            Ok(())
        }
        Err(e) => {
            error!("Probe failed: {:#}", e);
            Err(e)
        }
    }
}
