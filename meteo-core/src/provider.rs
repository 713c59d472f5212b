use crate::{WeatherReport, error::Result};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod meteoswiss;

pub use meteoswiss::MeteoSwissProvider;

/// Current conditions for a single postal code.
///
/// Implementations issue exactly one bounded request per call and never retry.
/// A sentinel reading is returned as-is; deciding what it means is up to the caller.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, postal_code: &str) -> Result<WeatherReport>;
}
