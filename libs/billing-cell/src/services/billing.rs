use chrono::NaiveDate;
use tracing::debug;

use shared_client::HospitalApiClient;
use shared_config::QUERY_DATE_FORMAT;
use shared_models::{ApiResult, Capability, NormalizedResponse};

/// Provisional billing and invoice endpoints.
pub struct BillingService {
    client: HospitalApiClient,
}

impl BillingService {
    pub fn new(client: HospitalApiClient) -> Self {
        Self { client }
    }

    pub async fn provisional_info(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(
                Capability::PatientProvisionalInfo,
                "/Billing/PatientsProvisionalInfo",
                None,
            )
            .await
    }

    pub async fn provisional_items(
        &self,
        patient_id: u64,
        scheme_id: u64,
    ) -> ApiResult<NormalizedResponse> {
        debug!(
            "Fetching provisional items for patient {} under scheme {}",
            patient_id, scheme_id
        );

        let path = format!(
            "/Billing/ProvisionalItemsByPatientId?patientId={}&schemeId={}",
            patient_id, scheme_id
        );
        self.client
            .fetch(Capability::ProvisionalItems, &path, None)
            .await
    }

    pub async fn invoices(&self, from: NaiveDate, to: NaiveDate) -> ApiResult<NormalizedResponse> {
        let path = format!(
            "/Billing/Invoices?FromDate={}&ToDate={}",
            from.format(QUERY_DATE_FORMAT),
            to.format(QUERY_DATE_FORMAT)
        );
        self.client
            .fetch(Capability::InvoicesByDateRange, &path, None)
            .await
    }
}
