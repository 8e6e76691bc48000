use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, Method};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{ApiError, ApiResult, RawResponse};

/// A fully built request, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Executes HTTP requests. Production code uses [`ReqwestTransport`]; tests wrap it
/// in a [`crate::RecordingTransport`] to observe what the client sent.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> ApiResult<RawResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> ApiResult<RawResponse> {
        debug!("Sending {} {}", request.method, request.url);

        let mut req = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response.text().await.map_err(transport_error)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_body() || err.is_decode() {
        "body read failed"
    } else {
        "request failed"
    };

    error!("HTTP {}: {}", kind, err);
    ApiError::Transport(format!("{}: {}", kind, err))
}
