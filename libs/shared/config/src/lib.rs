use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://healthapp.yaksha.com/api";
pub const DEFAULT_SUITE_GROUP: &str = "PL1";

/// How the backend expects `FromDate`/`ToDate` query values.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: String,
    pub request_timeout: Option<Duration>,
    pub suite_group: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. `from_env` is the
    /// process-environment flavour; tests pass a map instead.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_base_url: lookup("HOSPITAL_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| {
                    warn!("HOSPITAL_API_BASE_URL not set, using default");
                    DEFAULT_BASE_URL.to_string()
                }),
            api_token: lookup("HOSPITAL_API_TOKEN")
                .unwrap_or_else(|| {
                    warn!("HOSPITAL_API_TOKEN not set, using empty value");
                    String::new()
                }),
            request_timeout: lookup("HOSPITAL_API_TIMEOUT_SECS").and_then(|raw| {
                match raw.parse::<u64>() {
                    Ok(secs) => Some(Duration::from_secs(secs)),
                    Err(_) => {
                        warn!("HOSPITAL_API_TIMEOUT_SECS is not a number: {}", raw);
                        None
                    }
                }
            }),
            suite_group: lookup("HOSPITAL_SUITE_GROUP")
                .unwrap_or_else(|| DEFAULT_SUITE_GROUP.to_string()),
        };

        if !config.is_configured() {
            warn!("Hospital API not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && !self.api_token.is_empty()
    }
}

/// Request parameters the functional scenarios send to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteParameters {
    pub patient_id: u64,
    pub patient_visit_id: u64,
    pub scheme_id: u64,
    pub provisional_patient_id: u64,
    pub dispensary_id: u64,
    pub ipd_search_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub invoice_to_date: NaiveDate,
}

impl Default for SuiteParameters {
    fn default() -> Self {
        Self {
            patient_id: 114,
            patient_visit_id: 53,
            scheme_id: 4,
            provisional_patient_id: 188,
            dispensary_id: 1,
            ipd_search_name: "Devid8 Roy8".to_string(),
            from_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
            to_date: NaiveDate::from_ymd_opt(2024, 11, 19).unwrap_or(NaiveDate::MIN),
            invoice_to_date: NaiveDate::from_ymd_opt(2024, 11, 21).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl SuiteParameters {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            patient_id: parse_or(&lookup, "HOSPITAL_PARAM_PATIENT_ID", defaults.patient_id),
            patient_visit_id: parse_or(
                &lookup,
                "HOSPITAL_PARAM_PATIENT_VISIT_ID",
                defaults.patient_visit_id,
            ),
            scheme_id: parse_or(&lookup, "HOSPITAL_PARAM_SCHEME_ID", defaults.scheme_id),
            provisional_patient_id: parse_or(
                &lookup,
                "HOSPITAL_PARAM_PROVISIONAL_PATIENT_ID",
                defaults.provisional_patient_id,
            ),
            dispensary_id: parse_or(&lookup, "HOSPITAL_PARAM_DISPENSARY_ID", defaults.dispensary_id),
            ipd_search_name: lookup("HOSPITAL_PARAM_IPD_SEARCH_NAME")
                .unwrap_or(defaults.ipd_search_name),
            from_date: parse_or(&lookup, "HOSPITAL_PARAM_FROM_DATE", defaults.from_date),
            to_date: parse_or(&lookup, "HOSPITAL_PARAM_TO_DATE", defaults.to_date),
            invoice_to_date: parse_or(
                &lookup,
                "HOSPITAL_PARAM_INVOICE_TO_DATE",
                defaults.invoice_to_date,
            ),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value ({}), keeping default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_source(source(&[]));

        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert!(config.api_token.is_empty());
        assert!(config.request_timeout.is_none());
        assert_eq!(config.suite_group, "PL1");
        assert!(!config.is_configured());
    }

    #[test]
    fn test_app_config_overrides() {
        let config = AppConfig::from_source(source(&[
            ("HOSPITAL_API_BASE_URL", "http://localhost:8080/api/"),
            ("HOSPITAL_API_TOKEN", "abc"),
            ("HOSPITAL_API_TIMEOUT_SECS", "15"),
        ]));

        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert!(config.is_configured());
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let config = AppConfig::from_source(source(&[("HOSPITAL_API_TIMEOUT_SECS", "soon")]));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_suite_parameters_fall_back_on_bad_values() {
        let params = SuiteParameters::from_source(source(&[
            ("HOSPITAL_PARAM_SCHEME_ID", "7"),
            ("HOSPITAL_PARAM_PATIENT_ID", "not-a-number"),
            ("HOSPITAL_PARAM_FROM_DATE", "2021-03-04"),
        ]));

        assert_eq!(params.scheme_id, 7);
        assert_eq!(params.patient_id, 114);
        assert_eq!(params.from_date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert_eq!(params.to_date, NaiveDate::from_ymd_opt(2024, 11, 19).unwrap());
    }
}
