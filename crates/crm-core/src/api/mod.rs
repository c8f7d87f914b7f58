//! API Client
//!
//! Thin wrapper over the REST backend. Every call goes through [`ApiClient::fetch`], which attaches
//! the bearer token, turns error statuses into user-facing messages and reports server failures.
//! The HTTP stack and the side effects are behind the [`Transport`] and [`ApiEvents`] seams.

mod auth;
mod backups;
mod entities;
mod import;
mod reports;
mod storage;

#[cfg(test)]
mod tests;

pub use auth::LoginArgs;
pub use entities::{AssignArgs, PageQuery};
pub use reports::{ReportFilters, ReportKind};

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::join_url;

// ========================
// Messages
// ========================

pub const MSG_UNAUTHORIZED: &str = "Unauthorized Activity. Please log in again.";
pub const MSG_HTML_ERROR_PAGE: &str = "Backend error: The server returned an error page instead of JSON. This usually means the endpoint doesn't exist or the backend is misconfigured.";
pub const MSG_NETWORK: &str = "Unable to connect to server. Please check your internet connection.";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
pub const MSG_NOT_JSON: &str = "Server returned unexpected data format";
pub const MSG_INVALID_JSON: &str = "Server returned invalid data. Please refresh the page or contact support.";

/// Characters left alone in query values (matches `encodeURIComponent`)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

// ========================
// Errors
// ========================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text suitable for an inline error message
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => MSG_UNAUTHORIZED.to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network(_) => MSG_NETWORK.to_string(),
            ApiError::Decode(_) => MSG_INVALID_JSON.to_string(),
            ApiError::Encode(e) => format!("Could not prepare request: {}", e),
        }
    }
}

/// Failure below HTTP: the request never produced a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS, CORS, offline
    #[error("network failure: {0}")]
    Network(String),
    /// Request could not be built or the response body could not be read
    #[error("request failure: {0}")]
    Request(String),
}

// ========================
// Request / Response
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<MultipartPart>),
}

/// File picked in the browser, already read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn into_part(self, field: &str) -> MultipartPart {
        MultipartPart {
            name: field.to_string(),
            value: PartValue::File {
                file_name: self.name,
                content_type: self.content_type,
                bytes: self.bytes,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the pair only when a value is present
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Path plus percent-encoded query string
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query_value(k), encode_query_value(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ========================
// Seams
// ========================

/// Sends one HTTP request. The browser implementation always includes cookies.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(
        &self,
        url: &str,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    Warning,
    Error,
}

/// Event forwarded to error tracking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub level: ErrorLevel,
    pub message: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Side effects of API calls: global logout signal, toasts and error tracking
pub trait ApiEvents {
    fn unauthorized(&self);
    fn toast_error(&self, message: &str);
    fn capture(&self, report: ErrorReport);
}

// ========================
// Client
// ========================

/// Cheap per-call handle: base URL, transport, event sink and a snapshot of the session token
pub struct ApiClient<T, E> {
    base: String,
    transport: T,
    events: E,
    token: Option<String>,
}

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub fn new(base: impl Into<String>, transport: T, events: E, token: Option<String>) -> Self {
        Self {
            base: base.into(),
            transport,
            events,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn url(&self, request: &ApiRequest) -> String {
        join_url(&self.base, &request.path_and_query())
    }

    /// Send a request. Only transport failures are errors; any HTTP status comes back as `Ok`
    /// after its toast and report have been emitted.
    pub async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(request);
        debug!("[API] {} {}", request.method.as_str(), url);

        let response = match self.transport.send(&url, request, self.token.as_deref()).await {
            Ok(response) => response,
            Err(TransportError::Network(detail)) => {
                warn!("[API] Network failure for {}: {}", url, detail);
                self.events.toast_error(MSG_NETWORK);
                self.events.capture(ErrorReport {
                    level: ErrorLevel::Warning,
                    message: detail.clone(),
                    url,
                    status: None,
                    method: None,
                    context: Some("Network connection failed".to_string()),
                });
                return Err(ApiError::Network(detail));
            }
            Err(TransportError::Request(detail)) => {
                warn!("[API] Request failure for {}: {}", url, detail);
                self.events.toast_error(MSG_UNEXPECTED);
                self.events.capture(ErrorReport {
                    level: ErrorLevel::Error,
                    message: detail.clone(),
                    url,
                    status: None,
                    method: None,
                    context: None,
                });
                return Err(ApiError::Network(detail));
            }
        };

        if response.status == 401 {
            warn!("[API] 401 from {}", url);
            self.events.toast_error(MSG_UNAUTHORIZED);
            self.events.unauthorized();
            return Ok(response);
        }

        if !response.is_success() {
            let message = error_message(&response);
            warn!("[API] {} from {}: {}", response.status, url, message);
            self.events.toast_error(&message);
            if response.status >= 500 {
                self.events.capture(ErrorReport {
                    level: ErrorLevel::Error,
                    message: format!("API Error: {}", message),
                    url,
                    status: Some(response.status),
                    method: Some(request.method.as_str()),
                    context: None,
                });
            }
        }

        Ok(response)
    }

    /// Fetch and decode a JSON body; error statuses become `Err` (already toasted by `fetch`)
    pub async fn fetch_json<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let response = self.checked(request).await?;
        if !response.is_json() {
            self.events.toast_error(MSG_NOT_JSON);
            return Err(ApiError::Decode("Expected JSON response".to_string()));
        }
        serde_json::from_slice(&response.body).map_err(|e| {
            warn!("[API] Failed to decode {}: {}", request.path, e);
            self.events.toast_error(MSG_INVALID_JSON);
            ApiError::Decode(e.to_string())
        })
    }

    /// Decode the value under `key` of a `{"<key>": ...}` envelope
    pub async fn fetch_envelope<R: DeserializeOwned>(&self, request: &ApiRequest, key: &str) -> Result<R, ApiError> {
        let mut body: serde_json::Value = self.fetch_json(request).await?;
        let inner = body.get_mut(key).map(serde_json::Value::take).unwrap_or_default();
        serde_json::from_value(inner).map_err(|e| {
            warn!("[API] Bad `{}` envelope from {}: {}", key, request.path, e);
            self.events.toast_error(MSG_INVALID_JSON);
            ApiError::Decode(e.to_string())
        })
    }

    /// For mutations whose response body is not needed
    pub async fn execute(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.checked(request).await.map(|_| ())
    }

    /// Raw body of a successful response (downloads)
    pub async fn fetch_bytes(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.checked(request).await
    }

    async fn checked(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.fetch(request).await?;
        match response.status {
            401 => Err(ApiError::Unauthorized),
            _ if response.is_success() => Ok(response),
            status => Err(ApiError::Status { status, message: error_message(&response) }),
        }
    }
}

/// User-facing message for a non-2xx response
pub fn error_message(response: &ApiResponse) -> String {
    let fallback = format!("Error: {}", response.status);

    if response.is_json() {
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&response.body) else {
            return format!("Error: {} - Unable to read error details", response.status);
        };
        return ["error", "message"]
            .iter()
            .find_map(|key| body.get(*key).and_then(|v| v.as_str()).filter(|s| !s.is_empty()))
            .map(str::to_string)
            .unwrap_or(fallback);
    }

    let Ok(text) = std::str::from_utf8(&response.body) else {
        return format!("Error: {} - Unable to read error details", response.status);
    };
    if text.contains("<!DOCTYPE") || text.contains("<html") {
        MSG_HTML_ERROR_PAGE.to_string()
    } else {
        format!("Error: {} {}", response.status, text)
    }
}
