//! Business-rule checks used by the scenarios. Each returns
//! `ApiError::Assertion` describing everything that failed.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use serde_json::Value;

use shared_models::{ApiError, ApiResult, Capability, NormalizedResponse, Record};

use crate::services::validator::logged_discrepancies;

/// Renders a JSON scalar the way the backend's ids are compared: strings
/// unquoted, everything else via its JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn fail_if_any(problems: Vec<String>) -> ApiResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApiError::assertion(problems.join("; ")))
    }
}

pub fn assert_status_ok(response: &NormalizedResponse) -> ApiResult<()> {
    let mut problems = Vec::new();

    if response.status_code() != 200 {
        problems.push(format!("HTTP status {}, expected 200", response.status_code()));
    }
    if response.status() != Some("OK") {
        problems.push(format!("Status {:?}, expected \"OK\"", response.status()));
    }

    fail_if_any(problems)
}

pub fn list_payload(response: &NormalizedResponse) -> ApiResult<&[Record]> {
    response.list_results().ok_or_else(|| {
        ApiError::assertion(format!("{} did not return a list", response.capability()))
    })
}

pub fn object_payload(response: &NormalizedResponse) -> ApiResult<&Record> {
    response.map_results().ok_or_else(|| {
        ApiError::assertion(format!("{} did not return an object", response.capability()))
    })
}

pub fn assert_non_empty<T>(items: &[T], what: &str) -> ApiResult<()> {
    if items.is_empty() {
        Err(ApiError::assertion(format!("{} list is empty", what)))
    } else {
        Ok(())
    }
}

/// Every record must carry a non-null value for every key.
pub fn assert_non_null(records: &[Record], keys: &[&str]) -> ApiResult<()> {
    let mut problems = Vec::new();

    for (index, record) in records.iter().enumerate() {
        for key in keys {
            if record.get(*key).map_or(true, Value::is_null) {
                problems.push(format!("[{}] '{}' is null or missing", index, key));
            }
        }
    }

    fail_if_any(problems)
}

pub fn assert_record_non_null(record: &Record, keys: &[&str]) -> ApiResult<()> {
    assert_non_null(std::slice::from_ref(record), keys)
}

/// Every record must have `key` absent or null.
pub fn assert_null(records: &[Record], key: &str) -> ApiResult<()> {
    let problems = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(format!("[{}] '{}' should be null, found {}", index, key, value)),
        })
        .collect();

    fail_if_any(problems)
}

/// No value may appear twice.
pub fn assert_unique<T, I>(values: I, what: &str) -> ApiResult<()>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    let duplicates: Vec<String> = values
        .into_iter()
        .filter_map(|value| {
            let rendered = value.to_string();
            (!seen.insert(value)).then_some(rendered)
        })
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ApiError::assertion(format!(
            "duplicate {}: {}",
            what,
            duplicates.join(", ")
        )))
    }
}

/// `actual` must equal the request parameter it echoes, compared as text.
pub fn assert_echo(actual: Option<&Value>, expected: impl Display, what: &str) -> ApiResult<()> {
    let expected = expected.to_string();

    match actual {
        Some(value) if stringify(value) == expected => Ok(()),
        Some(value) => Err(ApiError::assertion(format!(
            "{} is {}, expected {}",
            what,
            stringify(value),
            expected
        ))),
        None => Err(ApiError::assertion(format!("{} is missing, expected {}", what, expected))),
    }
}

/// Structural check against the capability's field spec, as an assertion.
pub fn assert_fields_valid(capability: Capability, response: &NormalizedResponse) -> ApiResult<()> {
    let found = logged_discrepancies(capability, response);

    if found.is_empty() {
        return Ok(());
    }

    Err(ApiError::assertion(format!(
        "{} failed field validation: {}",
        capability,
        found
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    )))
}
