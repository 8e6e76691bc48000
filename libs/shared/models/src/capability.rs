use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shape of the payload a capability returns at its result path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadShape {
    List,
    Object,
}

/// Where the payload lives inside the response document, e.g. `Results` or
/// `Results.requisitionList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultPath {
    pub segments: &'static [&'static str],
    pub shape: PayloadShape,
}

impl ResultPath {
    pub const fn list(segments: &'static [&'static str]) -> Self {
        Self {
            segments,
            shape: PayloadShape::List,
        }
    }

    pub const fn object(segments: &'static [&'static str]) -> Self {
        Self {
            segments,
            shape: PayloadShape::Object,
        }
    }

    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

const RESULTS: &[&str] = &["Results"];
const REQUISITION_LIST: &[&str] = &["Results", "requisitionList"];
const PROVISIONAL_ITEMS: &[&str] = &["Results", "ProvisionalItems"];

/// One logical backend operation exercised by the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    AllStocks,
    MainStore,
    RequisitionByDateRange,
    PatientConsumptions,
    PatientConsumptionInfo,
    BillingSchemeBySchemeId,
    BillingSummaryByPatientId,
    ConsumptionsOfPatient,
    ReturnConsumptions,
    DischargedPatients,
    AdmittedPatients,
    IpdPatientSearch,
    PatientProvisionalInfo,
    ProvisionalItems,
    InvoicesByDateRange,
    ProviderList,
    UsersList,
    CurrentFiscalYear,
}

impl Capability {
    pub const ALL: [Capability; 18] = [
        Capability::AllStocks,
        Capability::MainStore,
        Capability::RequisitionByDateRange,
        Capability::PatientConsumptions,
        Capability::PatientConsumptionInfo,
        Capability::BillingSchemeBySchemeId,
        Capability::BillingSummaryByPatientId,
        Capability::ConsumptionsOfPatient,
        Capability::ReturnConsumptions,
        Capability::DischargedPatients,
        Capability::AdmittedPatients,
        Capability::IpdPatientSearch,
        Capability::PatientProvisionalInfo,
        Capability::ProvisionalItems,
        Capability::InvoicesByDateRange,
        Capability::ProviderList,
        Capability::UsersList,
        Capability::CurrentFiscalYear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::AllStocks => "getAllStocks",
            Capability::MainStore => "getMainStore",
            Capability::RequisitionByDateRange => "getRequisitionByDateRange",
            Capability::PatientConsumptions => "getPatientConsumptions",
            Capability::PatientConsumptionInfo => "getPatientConsumptionInfoByPatientIdAndVisitId",
            Capability::BillingSchemeBySchemeId => "getBillingSchemeBySchemeId",
            Capability::BillingSummaryByPatientId => "getBillingSummaryByPatientId",
            Capability::ConsumptionsOfPatient => "getConsumptionsListOfAPatientById",
            Capability::ReturnConsumptions => "getReturnConsumptionsList",
            Capability::DischargedPatients => "getDischargedPatients",
            Capability::AdmittedPatients => "getAdmittedPatients",
            Capability::IpdPatientSearch => "searchIpdPatientByPatientId",
            Capability::PatientProvisionalInfo => "getPatientProvisionalInfo",
            Capability::ProvisionalItems => "getProvisionalItemsListByPatientIdAndSchemeId",
            Capability::InvoicesByDateRange => "getInvoicesByDateRange",
            Capability::ProviderList => "getProviderList",
            Capability::UsersList => "getUsersList",
            Capability::CurrentFiscalYear => "getCurrentFiscalYearDetails",
        }
    }

    /// The backend is not consistent about where it nests results, so the
    /// location is recorded per capability rather than normalized.
    pub fn result_path(&self) -> ResultPath {
        match self {
            Capability::RequisitionByDateRange => ResultPath::list(REQUISITION_LIST),
            Capability::ProvisionalItems => ResultPath::list(PROVISIONAL_ITEMS),
            Capability::MainStore
            | Capability::PatientConsumptionInfo
            | Capability::BillingSchemeBySchemeId
            | Capability::BillingSummaryByPatientId
            | Capability::CurrentFiscalYear => ResultPath::object(RESULTS),
            _ => ResultPath::list(RESULTS),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown capability: {0}")]
pub struct UnknownCapability(pub String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .copied()
            .find(|capability| capability.name() == s)
            .ok_or_else(|| UnknownCapability(s.to_string()))
    }
}
