use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde_json::Value;

use shared_models::{ApiError, ApiResult, RawResponse};

use crate::transport::{HttpRequest, HttpTransport};

/// One request observed by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl CallRecord {
    fn from_request(request: &HttpRequest) -> Self {
        let header = |name| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            method: request.method.clone(),
            url: request.url.clone(),
            authorization: header(AUTHORIZATION),
            content_type: header(CONTENT_TYPE),
            body: request.body.clone(),
        }
    }
}

/// Shared handle onto the calls a [`RecordingTransport`] has seen.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<CallRecord>>>,
}

impl CallLog {
    fn lock(&self) -> MutexGuard<'_, Vec<CallRecord>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, record: CallRecord) {
        self.lock().push(record);
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Checks that exactly one capability fetch went out the way the client
    /// contract requires: a single GET to `expected_url`, carrying an
    /// `Authorization` header and a JSON content type, with a body only when
    /// one was supplied. Every violation is reported, not just the first.
    pub fn assert_single_fetch(&self, expected_url: &str, expect_body: bool) -> ApiResult<()> {
        let calls = self.calls();

        let call = match calls.as_slice() {
            [call] => call,
            _ => {
                return Err(ApiError::assertion(format!(
                    "expected exactly one request, recorded {}",
                    calls.len()
                )))
            }
        };

        let mut problems = Vec::new();

        if call.method != Method::GET {
            problems.push(format!("method was {}, expected GET", call.method));
        }
        if call.url != expected_url {
            problems.push(format!("url was {}, expected {}", call.url, expected_url));
        }
        match call.authorization.as_deref() {
            Some(value) if !value.trim().is_empty() => {}
            _ => problems.push("Authorization header missing".to_string()),
        }
        if call.content_type.as_deref() != Some("application/json") {
            problems.push(format!(
                "Content-Type was {:?}, expected application/json",
                call.content_type
            ));
        }
        if call.body.is_some() != expect_body {
            problems.push(if expect_body {
                "request body missing".to_string()
            } else {
                "unexpected request body".to_string()
            });
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApiError::assertion(problems.join("; ")))
        }
    }
}

/// Transport decorator that records every request before delegating.
pub struct RecordingTransport<T> {
    inner: T,
    log: CallLog,
}

impl<T: HttpTransport> RecordingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            log: CallLog::default(),
        }
    }

    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for RecordingTransport<T> {
    async fn execute(&self, request: HttpRequest) -> ApiResult<RawResponse> {
        self.log.push(CallRecord::from_request(&request));
        self.inner.execute(request).await
    }
}
