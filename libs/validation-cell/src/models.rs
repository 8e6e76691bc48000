use std::fmt;

use futures::future::BoxFuture;

use shared_client::HospitalApiClient;
use shared_config::SuiteParameters;
use shared_models::{ApiResult, Capability, NormalizedResponse, PayloadShape};

/// Rules for one JSON location inside a response body.
///
/// List sections apply the key rules to every element; object sections apply
/// them to the mapping itself. `unique` only has meaning for lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub path: &'static [&'static str],
    pub shape: PayloadShape,
    pub non_empty: bool,
    pub present: &'static [&'static str],
    pub non_null: &'static [&'static str],
    pub null_or_absent: &'static [&'static str],
    pub unique: &'static [&'static str],
}

impl SectionSpec {
    pub const fn list(path: &'static [&'static str]) -> Self {
        Self {
            path,
            shape: PayloadShape::List,
            non_empty: false,
            present: &[],
            non_null: &[],
            null_or_absent: &[],
            unique: &[],
        }
    }

    pub const fn object(path: &'static [&'static str]) -> Self {
        Self {
            shape: PayloadShape::Object,
            ..Self::list(path)
        }
    }

    pub const fn non_empty(self) -> Self {
        Self {
            non_empty: true,
            ..self
        }
    }

    pub const fn present(self, keys: &'static [&'static str]) -> Self {
        Self {
            present: keys,
            ..self
        }
    }

    pub const fn non_null(self, keys: &'static [&'static str]) -> Self {
        Self {
            non_null: keys,
            ..self
        }
    }

    pub const fn null_or_absent(self, keys: &'static [&'static str]) -> Self {
        Self {
            null_or_absent: keys,
            ..self
        }
    }

    pub const fn unique(self, keys: &'static [&'static str]) -> Self {
        Self {
            unique: keys,
            ..self
        }
    }

    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// Expected structure of one capability's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub capability: Capability,
    pub require_status_ok: bool,
    pub sections: &'static [SectionSpec],
}

/// A single structural problem found by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub location: String,
    pub message: String,
}

impl Discrepancy {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

pub type ScenarioFuture<'a> = BoxFuture<'a, ApiResult<NormalizedResponse>>;

/// Runs one scenario; resolves to the checked response so the runner can dump it.
pub type ScenarioFn =
    for<'a> fn(&'a HospitalApiClient, &'a SuiteParameters) -> ScenarioFuture<'a>;

/// A registered functional test case.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub priority: u32,
    pub group: &'static str,
    pub name: &'static str,
    pub capability: Capability,
    pub description: &'static str,
    pub run: ScenarioFn,
}

impl Scenario {
    pub async fn execute(
        &self,
        client: &HospitalApiClient,
        params: &SuiteParameters,
    ) -> ApiResult<NormalizedResponse> {
        (self.run)(client, params).await
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.group.eq_ignore_ascii_case(group)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("priority", &self.priority)
            .field("group", &self.group)
            .field("name", &self.name)
            .field("capability", &self.capability)
            .finish()
    }
}

/// Orders scenarios for execution: priority first, then name.
pub fn sort_scenarios(scenarios: &mut [Scenario]) {
    scenarios.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.name.cmp(b.name)));
}
