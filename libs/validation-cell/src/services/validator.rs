use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use shared_models::{json_type, lookup_path, Capability, NormalizedResponse, PayloadShape, Record};

use crate::field_specs::field_spec;
use crate::models::{Discrepancy, SectionSpec};
use crate::services::assertions::stringify;

/// Checks a response against the field spec registered under `name`.
///
/// Unknown names fail validation rather than passing vacuously.
pub fn validate_fields(name: &str, response: &NormalizedResponse) -> bool {
    match name.parse::<Capability>() {
        Ok(capability) => validate(capability, response),
        Err(e) => {
            warn!("{}; no field spec to validate against", e);
            false
        }
    }
}

/// Checks a response against its capability's field spec, logging every
/// discrepancy found.
pub fn validate(capability: Capability, response: &NormalizedResponse) -> bool {
    let found = logged_discrepancies(capability, response);

    if found.is_empty() {
        debug!("{} passed field validation", capability);
    }

    found.is_empty()
}

/// Same as [`discrepancies`], with each one logged at warn.
pub(crate) fn logged_discrepancies(
    capability: Capability,
    response: &NormalizedResponse,
) -> Vec<Discrepancy> {
    let found = discrepancies(capability, response);

    for discrepancy in &found {
        warn!("{} field check: {}", capability, discrepancy);
    }

    found
}

/// Every structural problem in `response`, in document order.
pub fn discrepancies(capability: Capability, response: &NormalizedResponse) -> Vec<Discrepancy> {
    let Some(spec) = field_spec(capability) else {
        return vec![Discrepancy::new(capability.name(), "no field spec registered")];
    };

    let mut found = Vec::new();

    if spec.require_status_ok && response.status() != Some("OK") {
        found.push(Discrepancy::new(
            "Status",
            format!("expected \"OK\", found {:?}", response.status()),
        ));
    }

    for section in spec.sections {
        check_section(section, response.document(), &mut found);
    }

    found
}

fn check_section(section: &SectionSpec, document: &Value, found: &mut Vec<Discrepancy>) {
    let location = section.dotted();

    match (section.shape, lookup_path(document, section.path)) {
        (_, None) | (_, Some(Value::Null)) => {
            found.push(Discrepancy::new(location, "section missing or null"));
        }
        (PayloadShape::List, Some(Value::Array(items))) => {
            if section.non_empty && items.is_empty() {
                found.push(Discrepancy::new(&location, "list is empty"));
            }

            let mut records = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::Object(record) => {
                        check_record(section, record, &format!("{}[{}]", location, index), found);
                        records.push((index, record));
                    }
                    other => found.push(Discrepancy::new(
                        format!("{}[{}]", location, index),
                        format!("expected an object, found {}", json_type(other)),
                    )),
                }
            }

            check_unique(section, &location, &records, found);
        }
        (PayloadShape::Object, Some(Value::Object(record))) => {
            check_record(section, record, &location, found);
        }
        (PayloadShape::List, Some(other)) => found.push(Discrepancy::new(
            location,
            format!("expected a list, found {}", json_type(other)),
        )),
        (PayloadShape::Object, Some(other)) => found.push(Discrepancy::new(
            location,
            format!("expected an object, found {}", json_type(other)),
        )),
    }
}

fn check_record(section: &SectionSpec, record: &Record, location: &str, found: &mut Vec<Discrepancy>) {
    for key in section.present {
        if !record.contains_key(*key) {
            found.push(Discrepancy::new(location, format!("missing key '{}'", key)));
        }
    }

    for key in section.non_null {
        match record.get(*key) {
            None => found.push(Discrepancy::new(location, format!("missing key '{}'", key))),
            Some(Value::Null) => {
                found.push(Discrepancy::new(location, format!("'{}' is null", key)))
            }
            Some(_) => {}
        }
    }

    for key in section.null_or_absent {
        match record.get(*key) {
            None | Some(Value::Null) => {}
            Some(value) => found.push(Discrepancy::new(
                location,
                format!("'{}' should be null, found {}", key, value),
            )),
        }
    }
}

// Indices are positions in the original list, non-objects included.
fn check_unique(
    section: &SectionSpec,
    location: &str,
    records: &[(usize, &Record)],
    found: &mut Vec<Discrepancy>,
) {
    for key in section.unique {
        let mut seen: HashMap<String, usize> = HashMap::new();

        for &(index, record) in records {
            let Some(value) = record.get(*key).filter(|v| !v.is_null()) else {
                continue;
            };

            let first = *seen.entry(stringify(value)).or_insert(index);
            if first != index {
                found.push(Discrepancy::new(
                    format!("{}[{}]", location, index),
                    format!("'{}' = {} duplicates element {}", key, value, first),
                ));
            }
        }
    }
}
