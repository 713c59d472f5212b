use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// Client with a per-request timeout; every call through it is bounded.
pub(crate) fn client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Send `request` and return the body, failing on transport errors and non-2xx status.
pub(crate) async fn fetch_text(request: RequestBuilder, service: &str) -> Result<String> {
    let res = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {service}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {service} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{service} request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "ü".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.trim_end_matches("...").chars().count(), 100);
    }
}
