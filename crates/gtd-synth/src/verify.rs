//! Smoke checks against a running query service.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

/// Data endpoints answered with JSON.
pub const JSON_ENDPOINTS: &[&str] = &[
    "/data/overview",
    "/data/sample",
    "/data/yearly-trends",
    "/data/attack-types",
    "/data/weapon-popularity",
    "/data/weapon-casualties",
    "/data/total-casualties-by-region",
    "/data/annual-trends-casualties",
    "/data/attack-types-over-time",
    "/data/attack-types-by-region",
    "/data/global-distribution",
    "/data/weapon-analysis",
    "/data/weapon-hypothesis-test",
    "/api/eda/all-graphs",
];

/// Outcome of one endpoint check.
#[derive(Debug, Clone)]
pub struct EndpointCheck {
    pub endpoint: String,
    /// HTTP status, absent when the request never completed
    pub status: Option<u16>,
    pub passed: bool,
    pub detail: String,
}

impl EndpointCheck {
    fn failed(endpoint: &str, status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status,
            passed: false,
            detail: detail.into(),
        }
    }

    fn passed(endpoint: &str, status: u16, detail: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status: Some(status),
            passed: true,
            detail: detail.into(),
        }
    }
}

/// Build the HTTP client used for checks.
///
/// # Errors
///
/// TLS backend initialization failures.
pub fn client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Check every endpoint under `base_url`, in a fixed order.
pub async fn check_all(client: &Client, base_url: &str) -> Vec<EndpointCheck> {
    let base = base_url.trim_end_matches('/');
    let mut checks = Vec::with_capacity(JSON_ENDPOINTS.len() + 3);

    for endpoint in JSON_ENDPOINTS {
        checks.push(check_json(client, base, endpoint).await);
    }
    checks.push(check_report(client, base).await);
    checks.push(check_graphql(client, base).await);
    checks.push(check_health(client, base).await);

    checks
}

async fn check_json(client: &Client, base: &str, endpoint: &str) -> EndpointCheck {
    let response = match client.get(format!("{base}{endpoint}")).send().await {
        Ok(response) => response,
        Err(err) => return EndpointCheck::failed(endpoint, None, err.to_string()),
    };
    let status = response.status();

    // A degenerate hypothesis test is a valid answer for small datasets
    let acceptable = status.is_success()
        || (endpoint == "/data/weapon-hypothesis-test"
            && status == reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    if !acceptable {
        return EndpointCheck::failed(endpoint, Some(status.as_u16()), "unexpected status");
    }

    match response.json::<Value>().await {
        Ok(Value::Object(fields)) => {
            let keys: Vec<_> = fields.keys().map(String::as_str).collect();
            EndpointCheck::passed(endpoint, status.as_u16(), keys.join(", "))
        }
        Ok(other) => EndpointCheck::failed(
            endpoint,
            Some(status.as_u16()),
            format!("expected a JSON object, got {other}"),
        ),
        Err(err) => EndpointCheck::failed(endpoint, Some(status.as_u16()), err.to_string()),
    }
}

async fn check_report(client: &Client, base: &str) -> EndpointCheck {
    const ENDPOINT: &str = "/api/report";
    let response = match client.get(format!("{base}{ENDPOINT}")).send().await {
        Ok(response) => response,
        Err(err) => return EndpointCheck::failed(ENDPOINT, None, err.to_string()),
    };
    let status = response.status().as_u16();

    match response.text().await {
        Ok(body) if body.starts_with('#') => {
            EndpointCheck::passed(ENDPOINT, status, format!("{} bytes of markdown", body.len()))
        }
        Ok(_) => EndpointCheck::failed(ENDPOINT, Some(status), "report is not markdown"),
        Err(err) => EndpointCheck::failed(ENDPOINT, Some(status), err.to_string()),
    }
}

async fn check_graphql(client: &Client, base: &str) -> EndpointCheck {
    const ENDPOINT: &str = "/graphql";
    let query = json!({ "query": "{ eventCount }" });

    let response = match client.post(format!("{base}{ENDPOINT}")).json(&query).send().await {
        Ok(response) => response,
        Err(err) => return EndpointCheck::failed(ENDPOINT, None, err.to_string()),
    };
    let status = response.status().as_u16();

    match response.json::<Value>().await {
        Ok(body) => match body["data"]["eventCount"].as_i64() {
            Some(count) => EndpointCheck::passed(ENDPOINT, status, format!("eventCount = {count}")),
            None => EndpointCheck::failed(ENDPOINT, Some(status), body.to_string()),
        },
        Err(err) => EndpointCheck::failed(ENDPOINT, Some(status), err.to_string()),
    }
}

async fn check_health(client: &Client, base: &str) -> EndpointCheck {
    const ENDPOINT: &str = "/health";
    match client.get(format!("{base}{ENDPOINT}")).send().await {
        Ok(response) if response.status().is_success() => {
            EndpointCheck::passed(ENDPOINT, response.status().as_u16(), "OK")
        }
        Ok(response) => {
            EndpointCheck::failed(ENDPOINT, Some(response.status().as_u16()), "unhealthy")
        }
        Err(err) => EndpointCheck::failed(ENDPOINT, None, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_service_fails_every_check() {
        let client = client(Duration::from_millis(500)).unwrap();
        // Port 9 (discard) on loopback is not expected to run an HTTP server
        let checks = tokio_test::block_on(check_all(&client, "http://127.0.0.1:9/"));

        assert_eq!(checks.len(), JSON_ENDPOINTS.len() + 3);
        assert!(checks.iter().all(|c| !c.passed && c.status.is_none()));
        assert_eq!(checks[0].endpoint, "/data/overview");
        assert_eq!(checks.last().unwrap().endpoint, "/health");
    }
}
