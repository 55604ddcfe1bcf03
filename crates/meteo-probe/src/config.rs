//! Probe configuration from the gateway config file and environment

use anyhow::{Context, Result};
use meteo_config::GatewayConfig;
use std::collections::HashMap;
use std::env;

const DEFAULT_WINDOW_SECS: i64 = 86400;

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub gateway: GatewayConfig,

    /// Length of the summary window ending now, in seconds (default: 86400)
    pub window_secs: i64,

    /// Only report on this station instead of all of them
    pub station: Option<String>,
}

impl ProbeConfig {
    pub fn from_env() -> Result<Self> {
        let gateway = GatewayConfig::load().context("Failed to load gateway configuration")?;
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_parts(gateway, &vars)
    }

    /// Build from an already loaded gateway config and a set of variables
    pub fn from_parts(gateway: GatewayConfig, vars: &HashMap<String, String>) -> Result<Self> {
        let window_secs = match vars.get("PROBE_WINDOW_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PROBE_WINDOW_SECS: {raw}"))?,
            None => DEFAULT_WINDOW_SECS,
        };

        let station = vars
            .get("PROBE_STATION")
            .filter(|s| !s.is_empty())
            .cloned();

        Ok(Self {
            gateway,
            window_secs,
            station,
        })
    }
}
