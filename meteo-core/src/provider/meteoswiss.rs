use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{Config, DailyForecast, Error, WeatherObservation, WeatherReport, http};

use super::WeatherProvider;

/// Width of the `plz` parameter; Swiss postal codes are suffixed with zeros.
const PLZ_WIDTH: usize = 6;

/// MeteoSwiss app backend (`plzDetail`).
#[derive(Debug, Clone)]
pub struct MeteoSwissProvider {
    base_url: String,
    http: Client,
}

impl MeteoSwissProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = http::client(config.timeout())?;
        Ok(Self::new(config.weather_url.clone(), http))
    }

    async fn fetch(&self, postal_code: &str) -> Result<WeatherReport> {
        let plz = pad_postal_code(postal_code);
        debug!(postal_code, plz = %plz, "querying MeteoSwiss");

        let request = self.http.get(&self.base_url).query(&[("plz", plz.as_str())]);
        let body = http::fetch_text(request, "MeteoSwiss").await?;

        parse_plz_detail(&body)
    }
}

#[async_trait]
impl WeatherProvider for MeteoSwissProvider {
    async fn fetch_current(&self, postal_code: &str) -> crate::error::Result<WeatherReport> {
        self.fetch(postal_code).await.map_err(Error::Upstream)
    }
}

/// `8000` -> `800000`.
pub fn pad_postal_code(postal_code: &str) -> String {
    format!("{postal_code:0<PLZ_WIDTH$}")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MsDetail {
    current_weather: MsCurrent,
    #[serde(default)]
    forecast: Vec<MsForecastDay>,
}

#[derive(Debug, Deserialize)]
struct MsCurrent {
    time: i64,
    icon: i32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MsForecastDay {
    day_date: String,
    icon_day: i32,
    temperature_max: f64,
    temperature_min: f64,
    #[serde(default)]
    precipitation: f64,
}

fn parse_plz_detail(body: &str) -> Result<WeatherReport> {
    let parsed: MsDetail =
        serde_json::from_str(body).context("Failed to parse MeteoSwiss plzDetail JSON")?;

    let forecast = parsed
        .forecast
        .into_iter()
        .map(|d| -> Result<DailyForecast> {
            let day = NaiveDate::parse_from_str(&d.day_date, "%Y-%m-%d")
                .with_context(|| format!("Invalid forecast dayDate '{}'", d.day_date))?;
            Ok(DailyForecast {
                day,
                icon: d.icon_day,
                temperature_min_c: d.temperature_min,
                temperature_max_c: d.temperature_max,
                precipitation_mm: d.precipitation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WeatherReport {
        current: WeatherObservation {
            time_ms: parsed.current_weather.time,
            temperature_c: parsed.current_weather.temperature,
            icon: parsed.current_weather.icon,
        },
        forecast,
    })
}
