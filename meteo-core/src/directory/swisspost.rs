use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{Config, Error, LocationRecord, http};

use super::{Criterion, LocationDirectory};

const DATASET: &str = "plz_verzeichnis_v2";

/// Swiss Post postal-code directory (OpenDataSoft records API v1).
#[derive(Debug, Clone)]
pub struct SwissPostDirectory {
    base_url: String,
    rows: u32,
    http: Client,
}

impl SwissPostDirectory {
    pub fn new(base_url: String, rows: u32, http: Client) -> Self {
        Self { base_url, rows, http }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = http::client(config.timeout())?;
        Ok(Self::new(config.directory_url.clone(), config.rows, http))
    }

    async fn fetch(&self, criterion: Criterion, value: &str) -> Result<Vec<LocationRecord>> {
        let refine = match criterion {
            Criterion::ByCode => "refine.gplz",
            Criterion::ByName => "refine.ortbez18",
        };
        let rows = self.rows.to_string();

        debug!(%criterion, value, "querying postal-code directory");

        let request = self.http.get(&self.base_url).query(&[
            ("dataset", DATASET),
            ("q", ""),
            ("rows", rows.as_str()),
            (refine, value),
        ]);
        let body = http::fetch_text(request, "Swiss Post directory").await?;

        let records = parse_search(&body)?;
        debug!(%criterion, value, hits = records.len(), "directory lookup finished");

        Ok(records)
    }
}

#[async_trait]
impl LocationDirectory for SwissPostDirectory {
    async fn lookup(
        &self,
        criterion: Criterion,
        value: &str,
    ) -> crate::error::Result<Vec<LocationRecord>> {
        self.fetch(criterion, value).await.map_err(Error::Upstream)
    }
}

#[derive(Debug, Deserialize)]
struct SpSearchResponse {
    nhits: u64,
    #[serde(default)]
    records: Vec<SpRecord>,
}

#[derive(Debug, Deserialize)]
struct SpRecord {
    fields: SpFields,
}

#[derive(Debug, Deserialize)]
struct SpFields {
    postleitzahl: String,
    ortbez18: String,
    kanton: Option<String>,
    geo_point_2d: Option<[f64; 2]>,
}

/// Decode a search response; zero hits yields an empty list.
fn parse_search(body: &str) -> Result<Vec<LocationRecord>> {
    let parsed: SpSearchResponse =
        serde_json::from_str(body).context("Failed to parse Swiss Post directory JSON")?;

    if parsed.nhits == 0 {
        return Ok(Vec::new());
    }

    Ok(parsed
        .records
        .into_iter()
        .map(|r| LocationRecord {
            postal_code: r.fields.postleitzahl,
            name: r.fields.ortbez18,
            canton: r.fields.kanton,
            geo_point: r.fields.geo_point_2d.map(|[lat, lon]| (lat, lon)),
        })
        .collect())
}
