use shared_models::Capability;

use crate::models::{FieldSpec, SectionSpec};

const RESULTS: &[&str] = &["Results"];

// `RequistionNo` is the backend's spelling.
pub static FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        capability: Capability::AllStocks,
        require_status_ok: true,
        sections: &[SectionSpec::list(RESULTS)
            .non_empty()
            .present(&["ItemId", "ItemName", "GenericName", "SalePrice", "CostPrice"])],
    },
    FieldSpec {
        capability: Capability::MainStore,
        require_status_ok: false,
        sections: &[SectionSpec::object(RESULTS)
            .present(&["StoreId", "ParentStoreId", "Category", "IsActive"])],
    },
    FieldSpec {
        capability: Capability::RequisitionByDateRange,
        require_status_ok: false,
        sections: &[SectionSpec::list(&["Results", "requisitionList"])
            .present(&["RequisitionId", "RequistionNo", "RequisitionStatus"])],
    },
    FieldSpec {
        capability: Capability::PatientConsumptions,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS)
            .present(&["PatientId", "HospitalNo", "PatientVisitId"])],
    },
    FieldSpec {
        capability: Capability::PatientConsumptionInfo,
        require_status_ok: false,
        sections: &[
            SectionSpec::object(&["Results", "PatientConsumption"])
                .present(&["PatientId", "PatientName", "HospitalNo", "StoreId"]),
            SectionSpec::list(&["Results", "PatientConsumptionItems"])
                .non_empty()
                .present(&[
                    "PatientConsumptionItemId",
                    "ItemId",
                    "ItemName",
                    "Quantity",
                    "SalePrice",
                    "TotalAmount",
                    "BatchNo",
                    "ExpiryDate",
                    "StoreId",
                ]),
        ],
    },
    FieldSpec {
        capability: Capability::BillingSchemeBySchemeId,
        require_status_ok: false,
        sections: &[SectionSpec::object(RESULTS)
            .present(&["SchemeCode", "SchemeName", "CommunityName", "SchemeId"])],
    },
    FieldSpec {
        capability: Capability::BillingSummaryByPatientId,
        require_status_ok: false,
        sections: &[SectionSpec::object(RESULTS)
            .present(&["PatientId", "CreditAmount", "ProvisionalAmt", "TotalDue"])],
    },
    FieldSpec {
        capability: Capability::ConsumptionsOfPatient,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS).non_empty().present(&[
            "PatientConsumptionId",
            "ConsumptionReceiptNo",
            "TotalAmount",
            "ItemName",
        ])],
    },
    FieldSpec {
        capability: Capability::ReturnConsumptions,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS)
            .present(&["ConsumptionReturnReceiptNo", "HospitalNo", "PatientId"])],
    },
    FieldSpec {
        capability: Capability::DischargedPatients,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS).present(&[
            "VisitCode",
            "PatientVisitId",
            "PatientAdmissionId",
            "PatientId",
        ])],
    },
    FieldSpec {
        capability: Capability::AdmittedPatients,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS)
            .non_null(&["PatientId", "VisitId"])
            .null_or_absent(&["DischargeDate"])],
    },
    FieldSpec {
        capability: Capability::IpdPatientSearch,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS).non_null(&["PatientId", "PatientCode"])],
    },
    FieldSpec {
        capability: Capability::PatientProvisionalInfo,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS).non_null(&["PatientId", "PatientCode"])],
    },
    FieldSpec {
        capability: Capability::ProvisionalItems,
        require_status_ok: false,
        sections: &[
            SectionSpec::object(RESULTS).present(&["PatientId", "ProvisionalItems"]),
            SectionSpec::list(&["Results", "ProvisionalItems"])
                .non_empty()
                .non_null(&["PatientId"]),
        ],
    },
    FieldSpec {
        capability: Capability::InvoicesByDateRange,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS)
            .non_empty()
            .non_null(&["InvoiceNumber", "InvoiceCode"])],
    },
    FieldSpec {
        capability: Capability::ProviderList,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS).non_null(&["EmployeeId", "EmployeeName"])],
    },
    FieldSpec {
        capability: Capability::UsersList,
        require_status_ok: false,
        sections: &[SectionSpec::list(RESULTS)
            .non_null(&["UserId", "ShortName", "DepartmentName"])
            .unique(&["UserId"])],
    },
    FieldSpec {
        capability: Capability::CurrentFiscalYear,
        require_status_ok: false,
        sections: &[SectionSpec::object(RESULTS).non_null(&["FiscalYearId", "FiscalYearName"])],
    },
];

pub fn field_spec(capability: Capability) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|spec| spec.capability == capability)
}
