use std::time::Duration;

use serde_json::{json, Value};

use shared_config::{AppConfig, SuiteParameters, DEFAULT_SUITE_GROUP};
use shared_models::Capability;

pub struct TestConfig {
    pub api_token: String,
    pub request_timeout_secs: u64,
    pub parameters: SuiteParameters,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_token: "test-token".to_string(),
            request_timeout_secs: 5,
            parameters: SuiteParameters::default(),
        }
    }
}

impl TestConfig {
    /// Configuration pointing at a mock server, usually `MockServer::uri()`.
    pub fn to_app_config(&self, base_url: &str) -> AppConfig {
        AppConfig {
            api_base_url: base_url.trim_end_matches('/').to_string(),
            api_token: self.api_token.clone(),
            request_timeout: Some(Duration::from_secs(self.request_timeout_secs)),
            suite_group: DEFAULT_SUITE_GROUP.to_string(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token)
    }
}

/// Canned backend bodies. Identifiers line up with `SuiteParameters::default()`
/// so every scenario passes against them unmodified.
pub struct MockHospitalResponses;

impl MockHospitalResponses {
    pub fn envelope(results: Value) -> Value {
        json!({
            "Status": "OK",
            "Results": results
        })
    }

    pub fn failed(message: &str) -> Value {
        json!({
            "Status": "Failed",
            "ErrorMessage": message,
            "Results": null
        })
    }

    pub fn for_capability(capability: Capability) -> Value {
        match capability {
            Capability::AllStocks => Self::all_stocks(),
            Capability::MainStore => Self::main_store(),
            Capability::RequisitionByDateRange => Self::requisitions(),
            Capability::PatientConsumptions => Self::patient_consumptions(),
            Capability::PatientConsumptionInfo => Self::patient_consumption_info(114),
            Capability::BillingSchemeBySchemeId => Self::billing_scheme(4),
            Capability::BillingSummaryByPatientId => Self::billing_summary(114),
            Capability::ConsumptionsOfPatient => Self::consumptions_of_patient(),
            Capability::ReturnConsumptions => Self::return_consumptions(),
            Capability::DischargedPatients => Self::discharged_patients(),
            Capability::AdmittedPatients => Self::admitted_patients(),
            Capability::IpdPatientSearch => Self::ipd_patient_search(),
            Capability::PatientProvisionalInfo => Self::provisional_info(),
            Capability::ProvisionalItems => Self::provisional_items(188),
            Capability::InvoicesByDateRange => Self::invoices(),
            Capability::ProviderList => Self::providers(),
            Capability::UsersList => Self::users(),
            Capability::CurrentFiscalYear => Self::fiscal_year(),
        }
    }

    pub fn all_stocks() -> Value {
        Self::envelope(json!([
            {
                "ItemId": 1,
                "ItemName": "Paracetamol 500mg",
                "GenericName": "Paracetamol",
                "SalePrice": 2.5,
                "CostPrice": 1.8,
                "AvailableQuantity": 420
            },
            {
                "ItemId": 2,
                "ItemName": "Amoxicillin 250mg",
                "GenericName": "Amoxicillin",
                "SalePrice": 6.0,
                "CostPrice": 4.2,
                "AvailableQuantity": 80
            }
        ]))
    }

    pub fn main_store() -> Value {
        Self::envelope(json!({
            "StoreId": 1,
            "ParentStoreId": 0,
            "Name": "Main Store",
            "Category": "store",
            "IsActive": true
        }))
    }

    pub fn requisitions() -> Value {
        Self::envelope(json!({
            "requisitionList": [
                {
                    "RequisitionId": 31,
                    "RequistionNo": 12,
                    "RequisitionStatus": "complete",
                    "RequisitionDate": "2024-03-02T10:15:00"
                },
                {
                    "RequisitionId": 32,
                    "RequistionNo": 13,
                    "RequisitionStatus": "active",
                    "RequisitionDate": "2024-03-05T08:40:00"
                }
            ]
        }))
    }

    pub fn patient_consumptions() -> Value {
        Self::envelope(json!([
            {
                "PatientId": 114,
                "HospitalNo": "2311000114",
                "PatientVisitId": 53,
                "PatientName": "Devid8 Roy8"
            },
            {
                "PatientId": 120,
                "HospitalNo": "2311000120",
                "PatientVisitId": 61,
                "PatientName": "Sita Rai"
            }
        ]))
    }

    pub fn patient_consumption_info(patient_id: u64) -> Value {
        Self::envelope(json!({
            "PatientConsumption": {
                "PatientId": patient_id,
                "PatientName": "Devid8 Roy8",
                "HospitalNo": "2311000114",
                "StoreId": 1
            },
            "PatientConsumptionItems": [
                {
                    "PatientConsumptionItemId": 501,
                    "ItemId": 1,
                    "ItemName": "Paracetamol 500mg",
                    "Quantity": 10,
                    "SalePrice": 2.5,
                    "TotalAmount": 25.0,
                    "BatchNo": "PCM-2024-01",
                    "ExpiryDate": "2026-01-31T00:00:00",
                    "StoreId": 1
                }
            ]
        }))
    }

    pub fn billing_scheme(scheme_id: u64) -> Value {
        Self::envelope(json!({
            "SchemeId": scheme_id,
            "SchemeCode": "GEN",
            "SchemeName": "General",
            "CommunityName": "General Community"
        }))
    }

    pub fn billing_summary(patient_id: u64) -> Value {
        Self::envelope(json!({
            "PatientId": patient_id,
            "CreditAmount": 0,
            "ProvisionalAmt": 250.0,
            "TotalDue": 250.0
        }))
    }

    pub fn consumptions_of_patient() -> Value {
        Self::envelope(json!([
            {
                "PatientConsumptionId": 71,
                "ConsumptionReceiptNo": 9,
                "TotalAmount": 25.0,
                "ItemName": "Paracetamol 500mg"
            },
            {
                "PatientConsumptionId": 72,
                "ConsumptionReceiptNo": 10,
                "TotalAmount": 60.0,
                "ItemName": "Amoxicillin 250mg"
            }
        ]))
    }

    pub fn return_consumptions() -> Value {
        Self::envelope(json!([
            {
                "ConsumptionReturnReceiptNo": 3,
                "HospitalNo": "2311000114",
                "PatientId": 114
            },
            {
                "ConsumptionReturnReceiptNo": 4,
                "HospitalNo": "2311000120",
                "PatientId": 120
            }
        ]))
    }

    pub fn discharged_patients() -> Value {
        Self::envelope(json!([
            {
                "VisitCode": "H2300041",
                "PatientVisitId": 41,
                "PatientAdmissionId": 7,
                "PatientId": 98
            },
            {
                "VisitCode": "H2300044",
                "PatientVisitId": 44,
                "PatientAdmissionId": 8,
                "PatientId": 101
            }
        ]))
    }

    pub fn admitted_patients() -> Value {
        Self::envelope(json!([
            {
                "PatientId": 114,
                "VisitId": 53,
                "AdmittedDate": "2024-11-10T09:00:00",
                "DischargeDate": null
            },
            {
                "PatientId": 188,
                "VisitId": 90,
                "AdmittedDate": "2024-11-12T14:30:00"
            }
        ]))
    }

    pub fn ipd_patient_search() -> Value {
        Self::envelope(json!([
            {
                "PatientId": 114,
                "PatientCode": "2311000114",
                "ShortName": "Devid8 Roy8"
            }
        ]))
    }

    pub fn provisional_info() -> Value {
        Self::envelope(json!([
            {
                "PatientId": 188,
                "PatientCode": "2311000188",
                "ShortName": "Ram Shah"
            }
        ]))
    }

    pub fn provisional_items(patient_id: u64) -> Value {
        Self::envelope(json!({
            "PatientId": patient_id,
            "ProvisionalItems": [
                { "PatientId": patient_id, "ItemName": "X-Ray Chest", "TotalAmount": 800 },
                { "PatientId": patient_id, "ItemName": "CBC", "TotalAmount": 450 }
            ]
        }))
    }

    pub fn invoices() -> Value {
        Self::envelope(json!([
            {
                "InvoiceNumber": 1001,
                "InvoiceCode": "BL",
                "TotalAmount": 1250.0
            },
            {
                "InvoiceNumber": 1002,
                "InvoiceCode": "BL",
                "TotalAmount": 300.0
            }
        ]))
    }

    pub fn providers() -> Value {
        Self::envelope(json!([
            { "EmployeeId": 1, "EmployeeName": "Dr. Asha Karki" },
            { "EmployeeId": 2, "EmployeeName": "Dr. Binod Thapa" }
        ]))
    }

    pub fn users() -> Value {
        Self::envelope(json!([
            { "UserId": 1, "ShortName": "admin", "DepartmentName": "Administration" },
            { "UserId": 2, "ShortName": "pharm", "DepartmentName": "Pharmacy" }
        ]))
    }

    pub fn fiscal_year() -> Value {
        Self::envelope(json!({
            "FiscalYearId": 3,
            "FiscalYearName": "2024/2025",
            "StartYear": "2024-07-16T00:00:00",
            "EndYear": "2025-07-15T23:59:59"
        }))
    }
}
