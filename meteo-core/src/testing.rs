//! In-memory providers that record every call, and a one-shot HTTP stub for client tests.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

use crate::{
    LocationRecord, WeatherObservation, WeatherReport,
    directory::{Criterion, LocationDirectory},
    error::{Error, Result},
    provider::WeatherProvider,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeDirectory {
    entries: HashMap<(Criterion, String), Vec<LocationRecord>>,
    fail: bool,
    calls: Arc<Mutex<Vec<(Criterion, String)>>>,
}

impl FakeDirectory {
    pub(crate) fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub(crate) fn with_code(self, code: &str, records: &[(&str, &str)]) -> Self {
        self.with(Criterion::ByCode, code, records)
    }

    pub(crate) fn with_name(self, name: &str, records: &[(&str, &str)]) -> Self {
        self.with(Criterion::ByName, name, records)
    }

    fn with(mut self, criterion: Criterion, value: &str, records: &[(&str, &str)]) -> Self {
        self.entries
            .entry((criterion, value.to_string()))
            .or_default()
            .extend(records.iter().map(|(code, name)| LocationRecord {
                postal_code: code.to_string(),
                name: name.to_string(),
                canton: None,
                geo_point: None,
            }));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Criterion, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocationDirectory for FakeDirectory {
    async fn lookup(&self, criterion: Criterion, value: &str) -> Result<Vec<LocationRecord>> {
        self.calls.lock().unwrap().push((criterion, value.to_string()));

        if self.fail {
            return Err(Error::Upstream(anyhow::anyhow!("directory unreachable")));
        }

        Ok(self.entries.get(&(criterion, value.to_string())).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Reading { time_ms: i64, temperature_c: f64 },
    Failure,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWeather {
    outcomes: HashMap<String, Outcome>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeWeather {
    pub(crate) fn with_reading(mut self, code: &str, time_ms: i64, temperature_c: f64) -> Self {
        self.outcomes.insert(code.to_string(), Outcome::Reading { time_ms, temperature_c });
        self
    }

    pub(crate) fn with_failure(mut self, code: &str) -> Self {
        self.outcomes.insert(code.to_string(), Outcome::Failure);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn fetch_current(&self, postal_code: &str) -> Result<WeatherReport> {
        self.calls.lock().unwrap().push(postal_code.to_string());

        match self.outcomes.get(postal_code) {
            Some(Outcome::Reading { time_ms, temperature_c }) => Ok(WeatherReport {
                current: WeatherObservation {
                    time_ms: *time_ms,
                    temperature_c: *temperature_c,
                    icon: 1,
                },
                forecast: Vec::new(),
            }),
            Some(Outcome::Failure) => {
                Err(Error::Upstream(anyhow::anyhow!("MeteoSwiss request timed out")))
            }
            None => Err(Error::Upstream(anyhow::anyhow!("no fake reading for {postal_code}"))),
        }
    }
}

/// Raw HTTP/1.1 response with a correct `content-length`.
pub(crate) fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
         connection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Accept one connection on localhost and answer it with `response`, or never answer if `None`.
///
/// Returns the base URL and the request line the client sent.
pub(crate) async fn serve_once(response: Option<String>) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]);
        let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

        match response {
            Some(response) => {
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
            None => tokio::time::sleep(Duration::from_secs(30)).await,
        }
    });

    (format!("http://{addr}"), rx)
}
