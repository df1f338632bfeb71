//! HTTP client for the registration backend.

use crate::error::ApiError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Hard per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The only OTP the static mock backend treats as valid. Any other code is
/// rejected client-side; a real backend judges correctness itself.
const MOCK_VALID_OTP: &str = "1234";

// The mock backend answers instantly, so short pauses keep the loading
// states visible. Disabled for tests via `without_artificial_delay`.
const REQUEST_OTP_DELAY: Duration = Duration::from_millis(2000);
const VERIFY_OTP_DELAY: Duration = Duration::from_millis(1500);
const REGISTRATION_DELAY: Duration = Duration::from_millis(1000);

/// Client for the two registration operations and the health probe.
#[derive(Clone)]
pub struct RegistrationClient {
    client: Client,
    base_url: String,
    simulate_latency: bool,
}

impl RegistrationClient {
    /// Create a client with the default 10-second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            simulate_latency: true,
        })
    }

    /// Disable the artificial pre-call delays.
    pub fn without_artificial_delay(mut self) -> Self {
        self.simulate_latency = false;
        self
    }

    /// Ask the backend to send a one-time passcode to the chosen channel.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn request_otp(
        &self,
        request: &RequestOtpRequest,
    ) -> Result<RequestOtpResponse, ApiError> {
        self.pause(REQUEST_OTP_DELAY).await;

        let response = self
            .client
            .post(format!("{}/request-otp", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        self.handle_response(response).await
    }

    /// Verify the passcode and complete registration.
    ///
    /// Mock-environment scaffolding: the static backend cannot judge the
    /// code, so anything but the known-good value short-circuits into a
    /// synthetic 400 `INVALID_OTP` without calling the server. Drop this
    /// branch when a real backend owns OTP correctness.
    #[instrument(skip(self, request))]
    pub async fn verify_otp_and_register(
        &self,
        request: &VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, ApiError> {
        self.pause(VERIFY_OTP_DELAY).await;

        if request.otp != MOCK_VALID_OTP {
            warn!("Rejecting OTP client-side (mock backend)");
            return Err(ApiError::Api {
                status: 400,
                error_code: Some("INVALID_OTP".into()),
                message: "Invalid OTP code. Please try again.".into(),
            });
        }

        let response = self
            .client
            .post(format!("{}/verify-otp", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let result = self.handle_response(response).await?;

        self.pause(REGISTRATION_DELAY).await;
        Ok(result)
    }

    /// Health probe - true when the backend answers `GET /test` with 2xx.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/test", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn pause(&self, duration: Duration) {
        if self.simulate_latency {
            sleep(duration).await;
        }
    }

    /// Decode a 2xx body, or classify a non-2xx response into `ApiError`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(classify)?;
            debug!("Response body: {}", truncate_for_log(&body));
            serde_json::from_str(&body).map_err(ApiError::from)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Registration backend returned an error");

            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                error_code: parsed.error_code,
                message: parsed
                    .message
                    .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16())),
            })
        }
    }
}

/// Map transport errors, distinguishing the client-side timeout.
fn classify(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Http(e)
    }
}

/// Clip a body for debug logging, backing off to the nearest char boundary
/// so multibyte text never panics the slice.
fn truncate_for_log(body: &str) -> &str {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        return body;
    }
    let mut end = LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
