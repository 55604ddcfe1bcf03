//! Core data types for the meteorological dashboard
//!
//! Plain records returned by the station gateway, the sensor catalogue
//! and credential extraction. Nothing in this crate performs I/O.

pub mod credentials;
pub mod sensors;
pub mod types;

pub use credentials::*;
pub use sensors::*;
pub use types::*;
