//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration handling (endpoints, timeout, "no data" sentinel)
//! - Clients for the Swiss Post postal-code directory and MeteoSwiss
//! - Location resolution: city name or postal code to one code with a real reading
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod directory;
pub mod error;
pub mod expand;
mod http;
pub mod model;
pub mod provider;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use directory::{Criterion, LocationDirectory};
pub use error::{Error, ErrorKind};
pub use model::{
    Candidate, CandidateSet, DailyForecast, LocationQuery, LocationRecord, ResolvedWeather,
    WeatherObservation, WeatherReport,
};
pub use provider::WeatherProvider;
pub use resolver::{Resolver, resolver_from_config};
