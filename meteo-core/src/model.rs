use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What the user asked for: a postal code or a city name, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    PostalCode(String),
    CityName(String),
}

impl LocationQuery {
    /// Classify free-form input: all digits means postal code, anything else a city name.
    ///
    /// The postal code is not validated here; the resolver does that so a bad
    /// code is reported as [`Error::InvalidLocation`] in one place.
    pub fn detect(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidLocation("empty location".to_string()));
        }

        if input.chars().all(|c| c.is_ascii_digit()) {
            Ok(LocationQuery::PostalCode(input.to_string()))
        } else {
            Ok(LocationQuery::CityName(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocationQuery::PostalCode(code) => code,
            LocationQuery::CityName(name) => name,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::PostalCode(code) => write!(f, "postal code {code}"),
            LocationQuery::CityName(name) => write!(f, "city {name}"),
        }
    }
}

/// One entry of the postal-code directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub postal_code: String,
    pub name: String,
    pub canton: Option<String>,
    /// Latitude, longitude.
    pub geo_point: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub postal_code: String,
    pub name: String,
}

/// Postal codes to try, in directory response order, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Later duplicates of a code are dropped; the first record wins its name.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LocationRecord>) -> Self {
        let mut candidates: Vec<Candidate> = Vec::new();
        for record in records {
            if candidates.iter().any(|c| c.postal_code == record.postal_code) {
                continue;
            }
            candidates.push(Candidate {
                postal_code: record.postal_code.clone(),
                name: record.name.clone(),
            });
        }
        Self { candidates }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn codes(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.postal_code.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Epoch milliseconds as reported by the provider.
    pub time_ms: i64,
    pub temperature_c: f64,
    pub icon: i32,
}

impl WeatherObservation {
    pub fn observation_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub day: NaiveDate,
    pub icon: i32,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub precipitation_mm: f64,
}

/// Everything the weather provider returns for one postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherObservation,
    pub forecast: Vec<DailyForecast>,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedWeather {
    pub postal_code: String,
    pub location_name: String,
    pub report: WeatherReport,
}

impl ResolvedWeather {
    pub fn current(&self) -> &WeatherObservation {
        &self.report.current
    }
}
