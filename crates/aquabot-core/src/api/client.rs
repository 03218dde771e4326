//! HTTP client for the AquaBot backend.
//!
//! All responses pass through [`super::envelope::decode`]; HTTP errors,
//! backend error codes, and transport failures come back as [`AquaError`].

use std::time::Duration;

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    multipart::{Form, Part},
    RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use super::{
    envelope::{self, Envelope, OneOrMany},
    Backend, ChatReply, ChatTurn,
};
use crate::{
    config::ClientConfig,
    error::{AquaError, Result},
    models::{
        AnalysisResult, IrrigationPlan, LoginResponse, ScheduleItem, ScheduleKey, TodayTask,
        WeatherReport,
    },
};

/// Bearer-authenticated client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    request_timeout: Duration,
    analysis_timeout: Duration,
}

impl ApiClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AquaError::Configuration` if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AquaError::Configuration {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            request_timeout: config.request_timeout,
            analysis_timeout: config.analysis_timeout,
        })
    }

    /// Returns a client that authenticates with `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Logs in and returns the bearer token with the user's profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        require("email", email)?;
        require("password", password)?;

        let request = self
            .http_client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email.trim(), "password": password }));
        self.send::<LoginResponse>("Login", request)
            .await?
            .require_data("Login")
    }

    /// Creates an account. The backend logs the new user in directly.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<LoginResponse> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        let request = self.http_client.post(self.url("/api/auth/register")).json(&json!({
            "name": name.trim(),
            "email": email.trim(),
            "password": password,
        }));
        self.send::<LoginResponse>("Registration", request)
            .await?
            .require_data("Registration")
    }

    /// Requests a password reset code by email. Returns the backend message.
    pub async fn forgot_password(&self, email: &str) -> Result<String> {
        require("email", email)?;

        let request = self
            .http_client
            .post(self.url("/api/auth/forgot-password"))
            .json(&json!({ "email": email.trim() }));
        self.send_message("Password reset request", request).await
    }

    /// Sets a new password using the emailed code.
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<String> {
        require("email", email)?;
        require("code", code)?;
        require("new_password", new_password)?;

        let request = self
            .http_client
            .post(self.url("/api/auth/reset-password"))
            .json(&json!({
                "email": email.trim(),
                "code": code.trim(),
                "newPassword": new_password,
            }));
        self.send_message("Password reset", request).await
    }

    /// Uploads a field image for analysis.
    ///
    /// The whole exchange is aborted after the analysis timeout (60 seconds by
    /// default). The backend answers with either one result or a list.
    pub async fn analyze_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<Vec<AnalysisResult>> {
        if bytes.is_empty() {
            return Err(AquaError::invalid_input("image").with_reason("Image file is empty"));
        }

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))
            .map_err(|e| AquaError::network("Image analysis", e))?;
        let form = Form::new().part("image", part);

        let request = self
            .authorized(self.http_client.post(self.url("/api/analysis/analyze")))?
            .timeout(self.analysis_timeout)
            .multipart(form);

        let seconds = self.analysis_timeout.as_secs();
        let envelope = tokio::time::timeout(
            self.analysis_timeout,
            self.send_within::<OneOrMany<AnalysisResult>>(
                "Image analysis",
                request,
                self.analysis_timeout,
            ),
        )
        .await
        .map_err(|_| AquaError::Timeout {
            operation: "Image analysis".to_string(),
            seconds,
        })??;

        Ok(envelope.require_data("Image analysis")?.into_vec())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(AquaError::Unauthenticated),
        }
    }

    /// GETs a list payload. A missing or null `data` is an empty list.
    async fn get_list<T: DeserializeOwned>(&self, operation: &str, path: &str) -> Result<Vec<T>> {
        let request = self.authorized(self.http_client.get(self.url(path)))?;
        Ok(self
            .send::<Vec<T>>(operation, request)
            .await?
            .into_result()?
            .unwrap_or_default())
    }

    async fn post_data<B, T>(&self, operation: &str, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .authorized(self.http_client.post(self.url(path)))?
            .json(body);
        self.send::<T>(operation, request).await?.require_data(operation)
    }

    async fn send_message(&self, operation: &str, request: RequestBuilder) -> Result<String> {
        let envelope = self.send::<serde_json::Value>(operation, request).await?;
        let message = envelope.message.clone();
        envelope.into_result()?;
        Ok(message.unwrap_or_else(|| format!("{operation} succeeded")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Envelope<T>> {
        self.send_within(operation, request, self.request_timeout)
            .await
    }

    /// Sends `request` and normalizes the response. `timeout` is the budget
    /// the request was given, reported if it expires.
    async fn send_within<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Envelope<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(operation, e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(operation, e, timeout))?;
        debug!("{operation}: HTTP {status}");

        if status.is_success() {
            return envelope::decode(&body);
        }

        match envelope::decode::<serde_json::Value>(&body) {
            Ok(envelope) if envelope.message.is_some() || envelope.error_code.is_some() => {
                Err(envelope.into_error())
            }
            _ if status == StatusCode::UNAUTHORIZED => Err(AquaError::Unauthenticated),
            _ => Err(AquaError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            }),
        }
    }
}

impl Backend for ApiClient {
    async fn today_tasks(&self) -> Result<Vec<TodayTask>> {
        self.get_list("Today's tasks", "/api/tasks/today").await
    }

    async fn weather(&self, city: &str) -> Result<WeatherReport> {
        require("city", city)?;
        let request = self
            .authorized(self.http_client.get(self.url("/api/weather")))?
            .query(&[("city", city.trim())]);
        self.send::<WeatherReport>("Weather", request)
            .await?
            .require_data("Weather")
    }

    async fn irrigation_plans(&self, user_id: u64) -> Result<Vec<IrrigationPlan>> {
        self.get_list(
            "Irrigation plans",
            &format!("/api/irrigation/plans/{user_id}"),
        )
        .await
    }

    async fn complete_task(&self, key: &ScheduleKey) -> Result<ScheduleItem> {
        self.post_data("Task completion", "/api/tasks/complete", key)
            .await
    }

    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<ChatReply> {
        require("message", message)?;
        let body = json!({ "message": message.trim(), "history": history });
        self.post_data("Chat", "/api/chat", &body).await
    }
}

fn transport_error(operation: &str, error: reqwest::Error, timeout: Duration) -> AquaError {
    if error.is_timeout() {
        AquaError::Timeout {
            operation: operation.to_string(),
            seconds: timeout.as_secs(),
        }
    } else {
        AquaError::network(operation, error)
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AquaError::invalid_input(field).with_reason(format!("{} is required", capitalize(field))))
    } else {
        Ok(())
    }
}

fn capitalize(field: &str) -> String {
    let label = field.replace('_', " ");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn image_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".heic") {
        "image/heic"
    } else {
        "image/jpeg"
    }
}
