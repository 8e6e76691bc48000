use std::env;

use shared_config::AppConfig;
use shared_models::{ApiError, ApiResult};

/// Supplies the value sent in the `Authorization` header. How the token is
/// obtained (login, cache, refresh) is up to the implementation.
pub trait TokenProvider: Send + Sync {
    fn authorization_header(&self) -> ApiResult<String>;
}

fn bearer(token: &str) -> String {
    let token = token.trim();
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_token.clone())
    }
}

impl TokenProvider for StaticTokenProvider {
    fn authorization_header(&self) -> ApiResult<String> {
        if self.token.trim().is_empty() {
            return Err(ApiError::Configuration("API token is empty".to_string()));
        }
        Ok(bearer(&self.token))
    }
}

/// Reads the token from an environment variable on every call, so a token
/// refreshed by an outer process is picked up without rebuilding the client.
pub struct EnvTokenProvider {
    variable: String,
}

impl EnvTokenProvider {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new("HOSPITAL_API_TOKEN")
    }
}

impl TokenProvider for EnvTokenProvider {
    fn authorization_header(&self) -> ApiResult<String> {
        match env::var(&self.variable) {
            Ok(token) if !token.trim().is_empty() => Ok(bearer(&token)),
            _ => Err(ApiError::Configuration(format!(
                "{} is not set",
                self.variable
            ))),
        }
    }
}
