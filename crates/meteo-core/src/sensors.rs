//! Sensor catalogue
//!
//! Dashboard clients match on the Italian labels and rely on the catalogue
//! order, so neither may change.

use crate::types::AverageInstantaneousData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sensor a station may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sensor {
    Precipitation,
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
}

impl Sensor {
    /// Catalogue order: periodic sensors first, then instantaneous ones
    pub const ALL: [Sensor; 5] = [
        Sensor::Precipitation,
        Sensor::Temperature,
        Sensor::Humidity,
        Sensor::WindSpeed,
        Sensor::WindDirection,
    ];

    /// Label shown on the dashboard
    pub fn label(self) -> &'static str {
        match self {
            Sensor::Precipitation => "Pioggia",
            Sensor::Temperature => "Temperatura",
            Sensor::Humidity => "Umidità",
            Sensor::WindSpeed => "Velocità vento",
            Sensor::WindDirection => "Direzione vento",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sensors present at a station, given the all-time aggregates of its
/// periodic and instantaneous data. A non-null aggregate means the sensor
/// has reported at least once.
pub fn available_sensors(
    precipitation: Option<f64>,
    instantaneous: &AverageInstantaneousData,
) -> Vec<Sensor> {
    let checks = [
        (Sensor::Precipitation, precipitation),
        (Sensor::Temperature, instantaneous.temperature),
        (Sensor::Humidity, instantaneous.humidity),
        (Sensor::WindSpeed, instantaneous.wind_speed),
        (Sensor::WindDirection, instantaneous.wind_direction),
    ];

    checks
        .into_iter()
        .filter_map(|(sensor, aggregate)| aggregate.map(|_| sensor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(sensors: &[Sensor]) -> Vec<&'static str> {
        sensors.iter().map(|s| s.label()).collect()
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            labels(&Sensor::ALL),
            vec![
                "Pioggia",
                "Temperatura",
                "Umidità",
                "Velocità vento",
                "Direzione vento"
            ]
        );
    }

    #[test]
    fn test_temperature_and_wind_direction_only() {
        let averages = AverageInstantaneousData {
            temperature: Some(12.3),
            wind_direction: Some(270.0),
            ..Default::default()
        };
        let sensors = available_sensors(None, &averages);
        assert_eq!(labels(&sensors), vec!["Temperatura", "Direzione vento"]);
    }

    #[test]
    fn test_all_sensors_keep_catalogue_order() {
        let averages = AverageInstantaneousData {
            temperature: Some(1.0),
            humidity: Some(1.0),
            wind_speed: Some(1.0),
            wind_direction: Some(1.0),
        };
        assert_eq!(available_sensors(Some(0.0), &averages), Sensor::ALL.to_vec());
    }

    #[test]
    fn test_zero_aggregate_counts_as_present() {
        let sensors = available_sensors(Some(0.0), &AverageInstantaneousData::default());
        assert_eq!(sensors, vec![Sensor::Precipitation]);
    }

    #[test]
    fn test_no_history() {
        assert!(available_sensors(None, &AverageInstantaneousData::default()).is_empty());
    }

    #[test]
    fn test_order_for_every_combination() {
        for mask in 0u8..32 {
            let bit = |i: u8| (mask & (1 << i) != 0).then_some(1.0);
            let averages = AverageInstantaneousData {
                temperature: bit(1),
                humidity: bit(2),
                wind_speed: bit(3),
                wind_direction: bit(4),
            };
            let sensors = available_sensors(bit(0), &averages);

            let expected: Vec<_> = Sensor::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| s)
                .collect();
            assert_eq!(sensors, expected, "mask {mask:05b}");
        }
    }
}
