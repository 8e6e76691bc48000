use futures::FutureExt;
use tracing::info;

use shared_client::HospitalApiClient;
use shared_config::{SuiteParameters, DEFAULT_SUITE_GROUP};
use shared_models::{ApiResult, Capability, NormalizedResponse};
use validation_cell::{
    assert_echo, assert_fields_valid, assert_non_empty, assert_non_null, assert_record_non_null,
    assert_status_ok, assert_unique, list_payload, object_payload, Scenario,
};

use crate::models::{BillingUser, FiscalYear, ProvisionalItem};
use crate::services::{BillingService, BillingSettingsService};

fn checked(capability: Capability, response: &NormalizedResponse) -> ApiResult<()> {
    assert_status_ok(response)?;
    assert_fields_valid(capability, response)
}

pub async fn provisional_info(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = BillingService::new(client.clone()).provisional_info().await?;
    checked(Capability::PatientProvisionalInfo, &response)?;

    assert_non_null(list_payload(&response)?, &["PatientId", "PatientCode"])?;

    Ok(response)
}

pub async fn provisional_items(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = BillingService::new(client.clone())
        .provisional_items(params.provisional_patient_id, params.scheme_id)
        .await?;
    checked(Capability::ProvisionalItems, &response)?;

    let items: Vec<ProvisionalItem> = response.payload().rows()?;
    assert_non_empty(&items, "provisional item")?;
    for item in &items {
        assert_echo(
            Some(&item.patient_id),
            params.provisional_patient_id,
            "ProvisionalItems[].PatientId",
        )?;
    }

    Ok(response)
}

pub async fn invoices_by_date_range(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = BillingService::new(client.clone())
        .invoices(params.from_date, params.invoice_to_date)
        .await?;
    checked(Capability::InvoicesByDateRange, &response)?;

    let items = list_payload(&response)?;
    assert_non_empty(items, "invoice")?;
    assert_non_null(items, &["InvoiceNumber", "InvoiceCode"])?;

    Ok(response)
}

pub async fn provider_list(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = BillingSettingsService::new(client.clone())
        .providers()
        .await?;
    checked(Capability::ProviderList, &response)?;

    let items = list_payload(&response)?;
    assert_non_empty(items, "provider")?;
    assert_non_null(items, &["EmployeeId", "EmployeeName"])?;

    Ok(response)
}

pub async fn users_list(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = BillingSettingsService::new(client.clone()).users().await?;
    checked(Capability::UsersList, &response)?;

    let items = list_payload(&response)?;
    assert_non_empty(items, "user")?;
    assert_non_null(items, &["UserId", "ShortName", "DepartmentName"])?;

    let users: Vec<BillingUser> = response.payload().rows()?;
    assert_unique(users.iter().map(|u| u.user_id), "UserId")?;

    Ok(response)
}

pub async fn current_fiscal_year(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = BillingSettingsService::new(client.clone())
        .current_fiscal_year()
        .await?;
    checked(Capability::CurrentFiscalYear, &response)?;

    assert_record_non_null(
        object_payload(&response)?,
        &["FiscalYearId", "FiscalYearName"],
    )?;

    let fiscal_year: FiscalYear = response.payload().record()?;
    info!(
        "Current fiscal year is {} ({})",
        fiscal_year.fiscal_year_name, fiscal_year.fiscal_year_id
    );

    Ok(response)
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            priority: 13,
            group: DEFAULT_SUITE_GROUP,
            name: "provisional_info",
            capability: Capability::PatientProvisionalInfo,
            description: "Patients with provisional bills have an id and code",
            run: |client, params| provisional_info(client, params).boxed(),
        },
        Scenario {
            priority: 14,
            group: DEFAULT_SUITE_GROUP,
            name: "provisional_items",
            capability: Capability::ProvisionalItems,
            description: "Provisional items all belong to the requested patient",
            run: |client, params| provisional_items(client, params).boxed(),
        },
        Scenario {
            priority: 15,
            group: DEFAULT_SUITE_GROUP,
            name: "invoices_by_date_range",
            capability: Capability::InvoicesByDateRange,
            description: "Invoices in range have a number and code",
            run: |client, params| invoices_by_date_range(client, params).boxed(),
        },
        Scenario {
            priority: 16,
            group: DEFAULT_SUITE_GROUP,
            name: "provider_list",
            capability: Capability::ProviderList,
            description: "Provider list is non-empty with employee id and name",
            run: |client, params| provider_list(client, params).boxed(),
        },
        Scenario {
            priority: 17,
            group: DEFAULT_SUITE_GROUP,
            name: "users_list",
            capability: Capability::UsersList,
            description: "Users have unique ids, a short name and a department",
            run: |client, params| users_list(client, params).boxed(),
        },
        Scenario {
            priority: 18,
            group: DEFAULT_SUITE_GROUP,
            name: "current_fiscal_year",
            capability: Capability::CurrentFiscalYear,
            description: "Current fiscal year has an id and a name",
            run: |client, params| current_fiscal_year(client, params).boxed(),
        },
    ]
}
