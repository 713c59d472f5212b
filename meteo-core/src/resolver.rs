//! Turns a [`LocationQuery`] into exactly one postal code with a real reading.
//!
//! A city name or postal code usually maps to several directory entries. The
//! resolver asks the weather provider about each of them, in directory order,
//! and stops at the first one whose reading is not the provider's "no data"
//! sentinel.

use tracing::{debug, info};

use crate::{
    CandidateSet, Config, LocationQuery, ResolvedWeather, WeatherObservation,
    directory::{Criterion, LocationDirectory, SwissPostDirectory},
    error::{Error, Result},
    expand::ZipExpander,
    provider::{MeteoSwissProvider, WeatherProvider},
};

/// Swiss postal codes are exactly this many digits.
pub const POSTAL_CODE_LEN: usize = 4;

#[derive(Debug)]
pub struct Resolver {
    directory: Box<dyn LocationDirectory>,
    weather: Box<dyn WeatherProvider>,
    sentinel_time_ms: Option<i64>,
}

impl Resolver {
    /// Resolver without sentinel filtering; see [`Resolver::with_sentinel`].
    pub fn new(directory: Box<dyn LocationDirectory>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { directory, weather, sentinel_time_ms: None }
    }

    pub fn with_sentinel(mut self, sentinel_time_ms: Option<i64>) -> Self {
        self.sentinel_time_ms = sentinel_time_ms;
        self
    }

    pub fn directory(&self) -> &dyn LocationDirectory {
        self.directory.as_ref()
    }

    /// Resolve `query` to the first candidate with a real observation.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedWeather> {
        debug!(%query, "resolving location");

        let candidates = self.candidates(query).await?;
        self.first_observation(query, &candidates).await
    }

    /// Ordered candidate codes for `query`, without consulting the weather provider.
    pub async fn candidates(&self, query: &LocationQuery) -> Result<CandidateSet> {
        match query {
            LocationQuery::PostalCode(code) => {
                validate_postal_code(code)?;

                let candidates = ZipExpander::new(self.directory()).expand(code).await?;
                if candidates.is_empty() {
                    return Err(Error::InvalidLocation(format!(
                        "postal code {code} is not in the directory"
                    )));
                }
                Ok(candidates)
            }
            LocationQuery::CityName(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::InvalidLocation("empty city name".to_string()));
                }

                let records = self.directory.lookup(Criterion::ByName, name).await?;
                let candidates = CandidateSet::from_records(&records);
                if candidates.is_empty() {
                    return Err(Error::LocationNotFound(name.to_string()));
                }

                debug!(city = name, codes = ?candidates.codes(), "city name matched");
                Ok(candidates)
            }
        }
    }

    async fn first_observation(
        &self,
        query: &LocationQuery,
        candidates: &CandidateSet,
    ) -> Result<ResolvedWeather> {
        let mut tried = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            // A provider failure says nothing about this code, so it ends the scan.
            let report = self.weather.fetch_current(&candidate.postal_code).await?;
            tried.push(candidate.postal_code.clone());

            if self.is_sentinel(&report.current) {
                debug!(
                    postal_code = %candidate.postal_code,
                    "no observation, trying next candidate"
                );
                continue;
            }

            info!(
                postal_code = %candidate.postal_code,
                name = %candidate.name,
                temperature_c = report.current.temperature_c,
                "matched candidate"
            );

            return Ok(ResolvedWeather {
                postal_code: candidate.postal_code.clone(),
                location_name: candidate.name.clone(),
                report,
            });
        }

        Err(Error::NoObservationAvailable { location: query.as_str().to_string(), tried })
    }

    fn is_sentinel(&self, observation: &WeatherObservation) -> bool {
        self.sentinel_time_ms == Some(observation.time_ms)
    }
}

/// Construct the Swiss Post / MeteoSwiss resolver described by `config`.
pub fn resolver_from_config(config: &Config) -> anyhow::Result<Resolver> {
    config.validate()?;

    let directory = SwissPostDirectory::from_config(config)?;
    let weather = MeteoSwissProvider::from_config(config)?;

    Ok(Resolver::new(Box::new(directory), Box::new(weather)).with_sentinel(config.sentinel()))
}

pub fn validate_postal_code(code: &str) -> Result<()> {
    if code.len() != POSTAL_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidLocation(format!(
            "'{code}' is not a {POSTAL_CODE_LEN}-digit postal code"
        )));
    }
    Ok(())
}
