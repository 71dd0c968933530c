use chrono::NaiveDate;
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use crate::error::{Result, ScheduleError};
use crate::models::ScheduleQuery;
use crate::provider::payload::{self, DayPayload, Envelope};

pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com/v1";

/// Source of raw timing data. The service only relies on the payload shape.
pub trait ProviderGateway: Send + Sync {
    fn fetch_day(
        &self,
        query: &ScheduleQuery,
        date: NaiveDate,
    ) -> impl Future<Output = Result<DayPayload>> + Send;

    /// All days of a month, in the provider's (calendar) order.
    fn fetch_month(
        &self,
        query: &ScheduleQuery,
        month: u32,
        year: i32,
    ) -> impl Future<Output = Result<Vec<DayPayload>>> + Send;
}

/// HTTP client for the Aladhan-compatible `/timings` and `/calendar` endpoints.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    http: reqwest::Client,
    base_url: String,
}

impl AladhanClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("waqt/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ScheduleError::UpstreamUnavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_envelope(&self, path: &str, query: &ScheduleQuery) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&url, e))?;

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                warn!("Provider answered {} for {}", status, url);
                return Err(ScheduleError::UpstreamRejected {
                    code: status.as_u16(),
                    message: status.canonical_reason().unwrap_or("unknown status").to_string(),
                });
            }
            Err(e) => {
                return Err(ScheduleError::malformed_payload(format!(
                    "response from {} is not an envelope: {}",
                    url, e
                )));
            }
        };

        if envelope.code != 200 || !status.is_success() {
            let code = if envelope.code != 200 { envelope.code } else { status.as_u16() };
            let message = envelope.message();
            warn!("Provider rejected {} (code {}): {}", url, code, message);
            return Err(ScheduleError::UpstreamRejected { code, message });
        }
        Ok(envelope.data)
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> ScheduleError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    warn!("Provider request to {} failed: {}", url, reason);
    ScheduleError::UpstreamUnavailable(reason)
}

impl ProviderGateway for AladhanClient {
    async fn fetch_day(&self, query: &ScheduleQuery, date: NaiveDate) -> Result<DayPayload> {
        let path = format!("/timings/{}", date.format("%d-%m-%Y"));
        let data = self.get_envelope(&path, query).await?;
        payload::day_from_value(data)
    }

    async fn fetch_month(&self, query: &ScheduleQuery, month: u32, year: i32) -> Result<Vec<DayPayload>> {
        let path = format!("/calendar/{}/{}", year, month);
        let data = self.get_envelope(&path, query).await?;
        payload::days_from_value(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AladhanClient::new("http://localhost:9/v1/", Duration::from_secs(3)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/v1");
    }
}
