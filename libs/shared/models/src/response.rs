use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::capability::{Capability, PayloadShape, ResultPath};
use crate::error::{ApiError, ApiResult};

pub type Record = Map<String, Value>;

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    List(Vec<Record>),
    Object(Record),
}

impl Payload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            Payload::List(_) => PayloadShape::List,
            Payload::Object(_) => PayloadShape::Object,
        }
    }

    pub fn as_list(&self) -> Option<&[Record]> {
        match self {
            Payload::List(items) => Some(items),
            Payload::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Payload::Object(map) => Some(map),
            Payload::List(_) => None,
        }
    }

    /// Deserializes every list element into a typed row.
    pub fn rows<T: DeserializeOwned>(&self) -> ApiResult<Vec<T>> {
        let items = self
            .as_list()
            .ok_or_else(|| ApiError::malformed("Results", "expected a list payload"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(Value::Object(item.clone()))
                    .map_err(|e| ApiError::malformed(format!("Results[{}]", index), e.to_string()))
            })
            .collect()
    }

    /// Deserializes an object payload into a typed record.
    pub fn record<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let map = self
            .as_object()
            .ok_or_else(|| ApiError::malformed("Results", "expected an object payload"))?;

        serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| ApiError::malformed("Results", e.to_string()))
    }
}

/// Uniform view of one backend call: raw response, HTTP status code, the
/// top-level `Status` text and the payload found at the capability's result path.
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    capability: Capability,
    raw: RawResponse,
    document: Value,
    status_code: u16,
    status: Option<String>,
    payload: Payload,
}

impl NormalizedResponse {
    pub fn from_raw(capability: Capability, raw: RawResponse) -> ApiResult<Self> {
        let document: Value = serde_json::from_str(&raw.body).map_err(|e| {
            ApiError::malformed(
                "$",
                format!("HTTP {} body is not JSON: {}", raw.status, e),
            )
        })?;

        let status = document
            .get("Status")
            .and_then(Value::as_str)
            .map(str::to_string);

        let payload = extract_payload(&document, capability.result_path()).map_err(|err| {
            match err {
                ApiError::MalformedResponse { path, reason } => ApiError::MalformedResponse {
                    path,
                    reason: format!(
                        "{} (HTTP {}, Status={})",
                        reason,
                        raw.status,
                        status.as_deref().unwrap_or("<missing>")
                    ),
                },
                other => other,
            }
        })?;

        Ok(Self {
            capability,
            status_code: raw.status,
            raw,
            document,
            status,
            payload,
        })
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn list_results(&self) -> Option<&[Record]> {
        self.payload.as_list()
    }

    pub fn map_results(&self) -> Option<&Record> {
        self.payload.as_object()
    }

    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.document).unwrap_or_else(|_| self.raw.body.clone())
    }
}

/// Walks `segments` down from the document root.
pub fn lookup_path<'a>(document: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(document, |current, segment| current.get(*segment))
}

fn extract_payload(document: &Value, path: ResultPath) -> ApiResult<Payload> {
    let dotted = path.dotted();

    let value = match lookup_path(document, path.segments) {
        Some(Value::Null) | None => {
            return Err(ApiError::malformed(dotted, "missing or null"));
        }
        Some(value) => value,
    };

    match (path.shape, value) {
        (PayloadShape::List, Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(map.clone()),
                other => Err(ApiError::malformed(
                    format!("{}[{}]", dotted, index),
                    format!("expected an object, found {}", json_type(other)),
                )),
            })
            .collect::<ApiResult<Vec<_>>>()
            .map(Payload::List),
        (PayloadShape::Object, Value::Object(map)) => Ok(Payload::Object(map.clone())),
        (PayloadShape::List, other) => Err(ApiError::malformed(
            dotted,
            format!("expected a list, found {}", json_type(other)),
        )),
        (PayloadShape::Object, other) => Err(ApiError::malformed(
            dotted,
            format!("expected an object, found {}", json_type(other)),
        )),
    }
}

pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn raw(status: u16, body: Value) -> RawResponse {
        RawResponse::new(status, body.to_string())
    }

    #[test]
    fn test_list_payload_is_extracted() {
        let response = NormalizedResponse::from_raw(
            Capability::AllStocks,
            raw(200, json!({"Status": "OK", "Results": [{"ItemId": 1}, {"ItemId": 2}]})),
        )
        .unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.status(), Some("OK"));
        assert_eq!(response.list_results().unwrap().len(), 2);
        assert_eq!(response.payload().shape(), PayloadShape::List);
        assert!(response.map_results().is_none());
    }

    #[test]
    fn test_nested_list_payload_is_extracted() {
        let response = NormalizedResponse::from_raw(
            Capability::RequisitionByDateRange,
            raw(
                200,
                json!({"Status": "OK", "Results": {"requisitionList": [{"RequisitionId": 9}]}}),
            ),
        )
        .unwrap();

        let items = response.list_results().unwrap();
        assert_eq!(items[0]["RequisitionId"], json!(9));
    }

    #[test]
    fn test_object_payload_is_extracted() {
        let response = NormalizedResponse::from_raw(
            Capability::CurrentFiscalYear,
            raw(200, json!({"Status": "OK", "Results": {"FiscalYearId": 3}})),
        )
        .unwrap();

        assert_eq!(response.map_results().unwrap()["FiscalYearId"], json!(3));
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        let err = NormalizedResponse::from_raw(
            Capability::MainStore,
            raw(200, json!({"Status": "OK", "Results": []})),
        )
        .unwrap_err();

        match err {
            ApiError::MalformedResponse { path, reason } => {
                assert_eq!(path, "Results");
                assert!(reason.contains("expected an object"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_results_reports_status() {
        let err = NormalizedResponse::from_raw(
            Capability::ProviderList,
            raw(401, json!({"Status": "Failed", "Results": null})),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("HTTP 401"));
        assert!(message.contains("Status=Failed"));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = NormalizedResponse::from_raw(
            Capability::ProviderList,
            RawResponse::new(502, "<html>Bad Gateway</html>"),
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_non_object_list_element_is_malformed() {
        let err = NormalizedResponse::from_raw(
            Capability::UsersList,
            raw(200, json!({"Status": "OK", "Results": [{"UserId": 1}, 5]})),
        )
        .unwrap_err();

        match err {
            ApiError::MalformedResponse { path, .. } => assert_eq!(path, "Results[1]"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rows_deserialize_into_typed_records() {
        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Row {
            user_id: u64,
        }

        let payload = Payload::List(vec![
            json!({"UserId": 1}).as_object().unwrap().clone(),
            json!({"UserId": 2}).as_object().unwrap().clone(),
        ]);

        let rows: Vec<Row> = payload.rows().unwrap();
        assert_eq!(rows.iter().map(|r| r.user_id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
