use futures::FutureExt;
use serde_json::Value;
use tracing::info;

use shared_client::HospitalApiClient;
use shared_config::{SuiteParameters, DEFAULT_SUITE_GROUP};
use shared_models::{ApiError, ApiResult, Capability, NormalizedResponse};
use validation_cell::{
    assert_echo, assert_fields_valid, assert_non_empty, assert_non_null, assert_record_non_null,
    assert_status_ok, assert_unique, list_payload, object_payload, Scenario,
};

use crate::models::{BillingScheme, BillingSummary, ConsumptionReturn, PatientConsumption, Requisition};
use crate::services::{ConsumptionService, InventoryService};

/// Status, then structure, then the caller's business rules.
fn checked(capability: Capability, response: &NormalizedResponse) -> ApiResult<()> {
    assert_status_ok(response)?;
    assert_fields_valid(capability, response)
}

pub async fn all_stocks(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = InventoryService::new(client.clone()).all_stocks().await?;
    checked(Capability::AllStocks, &response)?;

    let items = list_payload(&response)?;
    assert_non_empty(items, "stock")?;
    assert_non_null(items, &["ItemId", "ItemName", "GenericName"])?;

    info!("{} stock items returned", items.len());
    Ok(response)
}

pub async fn main_store(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = InventoryService::new(client.clone()).main_store().await?;
    checked(Capability::MainStore, &response)?;

    let store = object_payload(&response)?;
    assert_record_non_null(store, &["StoreId", "Category", "IsActive"])?;

    Ok(response)
}

pub async fn requisitions_by_date_range(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = InventoryService::new(client.clone())
        .requisitions_by_date_range(params.dispensary_id, params.from_date, params.to_date)
        .await?;
    checked(Capability::RequisitionByDateRange, &response)?;

    let items = list_payload(&response)?;
    assert_non_empty(items, "requisition")?;
    assert_non_null(items, &["RequistionNo", "RequisitionStatus"])?;

    let requisitions: Vec<Requisition> = response.payload().rows()?;
    assert_unique(
        requisitions.iter().map(|r| r.requisition_id),
        "RequisitionId",
    )?;

    Ok(response)
}

pub async fn patient_consumptions(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = ConsumptionService::new(client.clone())
        .patient_consumptions()
        .await?;
    checked(Capability::PatientConsumptions, &response)?;

    let items = list_payload(&response)?;
    assert_non_empty(items, "patient consumption")?;
    assert_non_null(items, &["PatientId", "HospitalNo", "PatientVisitId"])?;

    Ok(response)
}

pub async fn consumption_info(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = ConsumptionService::new(client.clone())
        .consumption_info(params.patient_id, params.patient_visit_id)
        .await?;
    checked(Capability::PatientConsumptionInfo, &response)?;

    let consumption = match object_payload(&response)?.get("PatientConsumption") {
        Some(Value::Object(consumption)) => consumption,
        _ => return Err(ApiError::assertion("PatientConsumption is missing")),
    };
    assert_record_non_null(consumption, &["PatientName", "HospitalNo", "StoreId"])?;

    Ok(response)
}

pub async fn billing_scheme(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = ConsumptionService::new(client.clone())
        .billing_scheme(params.scheme_id)
        .await?;
    checked(Capability::BillingSchemeBySchemeId, &response)?;

    assert_record_non_null(object_payload(&response)?, &["SchemeCode"])?;

    let scheme: BillingScheme = response.payload().record()?;
    assert_echo(Some(&scheme.scheme_id), params.scheme_id, "SchemeId")?;

    Ok(response)
}

pub async fn billing_summary(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = ConsumptionService::new(client.clone())
        .billing_summary(params.patient_id)
        .await?;
    checked(Capability::BillingSummaryByPatientId, &response)?;

    let summary: BillingSummary = response.payload().record()?;
    assert_echo(Some(&summary.patient_id), params.patient_id, "PatientId")?;
    if summary.total_due.is_none() {
        return Err(ApiError::assertion("TotalDue is null"));
    }

    Ok(response)
}

pub async fn consumptions_of_patient(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = ConsumptionService::new(client.clone())
        .consumptions_of_patient(params.patient_id, params.patient_visit_id)
        .await?;
    checked(Capability::ConsumptionsOfPatient, &response)?;

    assert_non_null(list_payload(&response)?, &["TotalAmount"])?;

    let consumptions: Vec<PatientConsumption> = response.payload().rows()?;
    assert_unique(
        consumptions.iter().map(|c| c.patient_consumption_id),
        "PatientConsumptionId",
    )?;

    Ok(response)
}

pub async fn return_consumptions(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = ConsumptionService::new(client.clone()).returns().await?;
    checked(Capability::ReturnConsumptions, &response)?;

    assert_non_null(
        list_payload(&response)?,
        &["ConsumptionReturnReceiptNo", "PatientId"],
    )?;

    let returns: Vec<ConsumptionReturn> = response.payload().rows()?;
    assert_unique(
        returns.iter().map(|r| r.consumption_return_receipt_no),
        "ConsumptionReturnReceiptNo",
    )?;

    Ok(response)
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            priority: 1,
            group: DEFAULT_SUITE_GROUP,
            name: "all_stocks",
            capability: Capability::AllStocks,
            description: "Stock list is non-empty and every ItemId, ItemName and GenericName is set",
            run: |client, params| all_stocks(client, params).boxed(),
        },
        Scenario {
            priority: 2,
            group: DEFAULT_SUITE_GROUP,
            name: "main_store",
            capability: Capability::MainStore,
            description: "Main store has StoreId, Category and IsActive",
            run: |client, params| main_store(client, params).boxed(),
        },
        Scenario {
            priority: 3,
            group: DEFAULT_SUITE_GROUP,
            name: "requisitions_by_date_range",
            capability: Capability::RequisitionByDateRange,
            description: "Requisitions in range have a number and status, and unique ids",
            run: |client, params| requisitions_by_date_range(client, params).boxed(),
        },
        Scenario {
            priority: 4,
            group: DEFAULT_SUITE_GROUP,
            name: "patient_consumptions",
            capability: Capability::PatientConsumptions,
            description: "Patient consumptions carry PatientId, HospitalNo and PatientVisitId",
            run: |client, params| patient_consumptions(client, params).boxed(),
        },
        Scenario {
            priority: 5,
            group: DEFAULT_SUITE_GROUP,
            name: "consumption_info",
            capability: Capability::PatientConsumptionInfo,
            description: "Consumption info for a patient visit names the patient and store",
            run: |client, params| consumption_info(client, params).boxed(),
        },
        Scenario {
            priority: 6,
            group: DEFAULT_SUITE_GROUP,
            name: "billing_scheme",
            capability: Capability::BillingSchemeBySchemeId,
            description: "Billing scheme has a code and echoes the requested scheme id",
            run: |client, params| billing_scheme(client, params).boxed(),
        },
        Scenario {
            priority: 7,
            group: DEFAULT_SUITE_GROUP,
            name: "billing_summary",
            capability: Capability::BillingSummaryByPatientId,
            description: "Billing summary echoes the patient id and reports TotalDue",
            run: |client, params| billing_summary(client, params).boxed(),
        },
        Scenario {
            priority: 8,
            group: DEFAULT_SUITE_GROUP,
            name: "consumptions_of_patient",
            capability: Capability::ConsumptionsOfPatient,
            description: "Consumptions of a patient have amounts and unique ids",
            run: |client, params| consumptions_of_patient(client, params).boxed(),
        },
        Scenario {
            priority: 9,
            group: DEFAULT_SUITE_GROUP,
            name: "return_consumptions",
            capability: Capability::ReturnConsumptions,
            description: "Returns have unique receipt numbers and a patient",
            run: |client, params| return_consumptions(client, params).boxed(),
        },
    ]
}
