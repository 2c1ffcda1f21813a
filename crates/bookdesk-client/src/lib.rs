// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use bookdesk_app::{
    BookingDraft, BookingResponse, BookingResultData, NETWORK_ERROR_MESSAGE,
    SUBMISSION_FALLBACK_MESSAGE, SUCCESS_FALLBACK_MESSAGE, SubmissionErrorKind,
};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde_json::{Map, Value};
use std::time::Duration;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, error, info, warn};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://pestkiller.app.n8n.cloud/webhook-test/booking-assistant";
pub const ENDPOINT_ENV: &str = "BOOKDESK_WEBHOOK_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const LOGGED_BODY_LIMIT: usize = 512;

/// Picks the webhook address: explicit config first, then the environment
/// override, then the built-in fallback.
pub fn resolve_endpoint(configured: Option<&str>) -> String {
    let from_env = std::env::var(ENDPOINT_ENV).ok();
    resolve_endpoint_from(configured, from_env.as_deref())
}

pub fn resolve_endpoint_from(configured: Option<&str>, from_env: Option<&str>) -> String {
    [configured, from_env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_owned()
}

/// Formats like JavaScript's `Date.prototype.toISOString`.
pub fn format_timestamp(now: OffsetDateTime) -> Result<String> {
    now.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .context("format submission timestamp")
}

/// Request body: the draft's own fields plus `serviceType` and `timestamp`.
pub fn build_payload(draft: &BookingDraft, now: OffsetDateTime) -> Result<Value> {
    let Value::Object(fields) = serde_json::to_value(draft).context("serialize booking draft")?
    else {
        bail!("booking draft did not serialize to a JSON object");
    };

    let mut payload = Map::new();
    payload.insert(
        "serviceType".to_owned(),
        Value::String(draft.service_kind().as_str().to_owned()),
    );
    payload.insert(
        "timestamp".to_owned(),
        Value::String(format_timestamp(now)?),
    );
    payload.extend(fields);
    Ok(Value::Object(payload))
}

#[derive(Debug)]
enum SubmitFailure {
    Network(reqwest::Error),
    Status(StatusCode),
    Decode(String),
}

impl SubmitFailure {
    fn from_send(error: reqwest::Error) -> Self {
        // Builder errors mean the request was never attempted.
        if error.is_builder() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error)
        }
    }

    fn into_response(self) -> BookingResponse {
        match self {
            Self::Network(_) => {
                BookingResponse::failed(SubmissionErrorKind::Network, NETWORK_ERROR_MESSAGE)
            }
            Self::Status(status) => BookingResponse::failed(
                SubmissionErrorKind::Submission,
                format!("Server error: {}", status.as_u16()),
            ),
            Self::Decode(message) => BookingResponse::failed(
                SubmissionErrorKind::Submission,
                non_empty_or(message, SUBMISSION_FALLBACK_MESSAGE),
            ),
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

/// Posts booking drafts to the automation webhook. Every outcome, including
/// transport failure, comes back as a [`BookingResponse`].
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            bail!("webhook.url must not be empty -- set it in the config file or {ENDPOINT_ENV}");
        }
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("webhook.url {endpoint:?} is not a valid URL"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "webhook.url must use http or https, got {:?} -- fix the scheme and retry",
                endpoint.scheme()
            );
        }
        if timeout.is_zero() {
            bail!("webhook.timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            endpoint,
            timeout,
            http,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn submit(&self, draft: &BookingDraft) -> BookingResponse {
        self.submit_at(draft, OffsetDateTime::now_utc())
    }

    pub fn submit_at(&self, draft: &BookingDraft, now: OffsetDateTime) -> BookingResponse {
        let service = draft.service_kind().as_str();
        let payload = match build_payload(draft, now) {
            Ok(payload) => payload,
            Err(error) => {
                error!(service, error = %format!("{error:#}"), "could not build booking payload");
                return SubmitFailure::Decode(format!("{error:#}")).into_response();
            }
        };

        info!(service, endpoint = %self.endpoint, "submitting booking");
        match self.post(&payload) {
            Ok((message, data)) => {
                info!(
                    service,
                    recommendations = data.recommendations.len(),
                    "booking accepted"
                );
                BookingResponse::succeeded(message, data)
            }
            Err(failure) => {
                match &failure {
                    SubmitFailure::Network(error) => {
                        warn!(service, %error, "booking webhook unreachable");
                    }
                    SubmitFailure::Status(status) => {
                        warn!(service, status = status.as_u16(), "booking webhook rejected request");
                    }
                    SubmitFailure::Decode(message) => {
                        warn!(service, %message, "booking response could not be decoded");
                    }
                }
                failure.into_response()
            }
        }
    }

    fn post(&self, payload: &Value) -> Result<(String, BookingResultData), SubmitFailure> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .map_err(SubmitFailure::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            debug!(
                status = status.as_u16(),
                body = %truncate(&body, LOGGED_BODY_LIMIT),
                "error response body"
            );
            return Err(SubmitFailure::Status(status));
        }

        let bytes = response
            .bytes()
            .map_err(|error| SubmitFailure::Decode(error.to_string()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|error| SubmitFailure::Decode(error.to_string()))?;
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(SUCCESS_FALLBACK_MESSAGE)
            .to_owned();
        Ok((message, BookingResultData::from_value(value)))
    }
}

fn truncate(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_ENDPOINT, build_payload, format_timestamp, resolve_endpoint_from, truncate,
    };
    use bookdesk_app::{BookingForm, FieldKey, ServiceKind};
    use time::macros::datetime;

    #[test]
    fn timestamp_matches_iso_string_shape() {
        let formatted = format_timestamp(datetime!(2026-03-05 09:07:03.045 UTC))
            .expect("timestamp should format");
        assert_eq!(formatted, "2026-03-05T09:07:03.045Z");

        let shifted = format_timestamp(datetime!(2026-03-05 17:07:03.5 +08:00))
            .expect("timestamp should format");
        assert_eq!(shifted, "2026-03-05T09:07:03.500Z");
    }

    #[test]
    fn payload_spreads_draft_after_service_and_timestamp() {
        let mut form = BookingForm::fresh(ServiceKind::Cleaning);
        form.set_text(FieldKey::Name, "黃太");
        form.set_text(FieldKey::Phone, "98765432");
        form.set_text(FieldKey::Address, "將軍澳");
        form.toggle_add_on(bookdesk_app::AddOn::Carpet);
        let draft = form.gate().expect("draft should pass gate");

        let payload = build_payload(&draft, datetime!(2026-01-02 03:04:05 UTC))
            .expect("payload should build");
        assert_eq!(payload["serviceType"], "cleaning");
        assert_eq!(payload["timestamp"], "2026-01-02T03:04:05.000Z");
        assert_eq!(payload["name"], "黃太");
        assert_eq!(payload["mainService"], "家居清潔");
        assert_eq!(payload["addServices"], serde_json::json!(["carpet"]));
        assert_eq!(payload["subDistrict"], "中西區");
        assert!(payload.get("contact").is_none());
    }

    #[test]
    fn endpoint_prefers_config_then_env() {
        assert_eq!(
            resolve_endpoint_from(Some("http://a/"), Some("http://b/")),
            "http://a/"
        );
        assert_eq!(resolve_endpoint_from(Some("  "), Some("http://b/")), "http://b/");
        assert_eq!(resolve_endpoint_from(None, None), DEFAULT_ENDPOINT);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("預約已成功提交", 2), "預約");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
