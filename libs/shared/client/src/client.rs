use std::sync::Arc;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, Url,
};
use serde_json::Value;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_models::{ApiError, ApiResult, Capability, NormalizedResponse};

use crate::auth::{StaticTokenProvider, TokenProvider};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

/// Client for the hospital backend. Every capability goes through [`fetch`];
/// the per-endpoint services only build paths and query strings.
///
/// [`fetch`]: HospitalApiClient::fetch
#[derive(Clone)]
pub struct HospitalApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for HospitalApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HospitalApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HospitalApiClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::from_config(config)?;
        let tokens = StaticTokenProvider::from_config(config);

        Self::with_transport(&config.api_base_url, Arc::new(transport), Arc::new(tokens))
    }

    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenProvider>,
    ) -> ApiResult<Self> {
        Url::parse(base_url).map_err(|e| {
            ApiError::Configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn get_headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let authorization = self.tokens.authorization_header()?;
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&authorization).map_err(|e| {
                ApiError::Configuration(format!("Invalid Authorization header value: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Issues one GET for `capability` and normalizes the response.
    ///
    /// `endpoint` is appended to the base URL verbatim, query string included.
    /// A body, when given, is sent as JSON even though the verb is GET; a few
    /// backend routes read it.
    pub async fn fetch(
        &self,
        capability: Capability,
        endpoint: &str,
        body: Option<&Value>,
    ) -> ApiResult<NormalizedResponse> {
        let url = self.url_for(endpoint);
        debug!("Fetching {} from {}", capability, url);

        let request = HttpRequest {
            method: Method::GET,
            url,
            headers: self.get_headers()?,
            body: body.cloned(),
        };

        let raw = self.transport.execute(request).await?;
        let response = NormalizedResponse::from_raw(capability, raw)?;

        info!(
            "{} returned HTTP {} (Status={})",
            capability,
            response.status_code(),
            response.status().unwrap_or("<missing>")
        );

        Ok(response)
    }
}
