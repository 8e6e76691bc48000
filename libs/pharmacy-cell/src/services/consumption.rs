use tracing::debug;

use shared_client::HospitalApiClient;
use shared_models::{ApiResult, Capability, NormalizedResponse};

/// Patient consumption, IP billing scheme and pharmacy billing summary endpoints.
pub struct ConsumptionService {
    client: HospitalApiClient,
}

impl ConsumptionService {
    pub fn new(client: HospitalApiClient) -> Self {
        Self { client }
    }

    pub async fn patient_consumptions(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(
                Capability::PatientConsumptions,
                "/PatientConsumption/PatientConsumptions",
                None,
            )
            .await
    }

    pub async fn consumption_info(
        &self,
        patient_id: u64,
        patient_visit_id: u64,
    ) -> ApiResult<NormalizedResponse> {
        debug!(
            "Fetching consumption info for patient {} visit {}",
            patient_id, patient_visit_id
        );

        let path = format!(
            "/PatientConsumption/PatientConsumptionInfo?PatientId={}&patientVisitId={}",
            patient_id, patient_visit_id
        );
        self.client
            .fetch(Capability::PatientConsumptionInfo, &path, None)
            .await
    }

    pub async fn billing_scheme(&self, scheme_id: u64) -> ApiResult<NormalizedResponse> {
        let path = format!(
            "/PatientConsumption/PharmacyIpBillingScheme?schemeId={}",
            scheme_id
        );
        self.client
            .fetch(Capability::BillingSchemeBySchemeId, &path, None)
            .await
    }

    pub async fn billing_summary(&self, patient_id: u64) -> ApiResult<NormalizedResponse> {
        let path = format!(
            "/PharmacySales/PatientBillingSummary?patientId={}",
            patient_id
        );
        self.client
            .fetch(Capability::BillingSummaryByPatientId, &path, None)
            .await
    }

    pub async fn consumptions_of_patient(
        &self,
        patient_id: u64,
        patient_visit_id: u64,
    ) -> ApiResult<NormalizedResponse> {
        let path = format!(
            "/PatientConsumption/ConsumptionsOfPatient?patientId={}&patientVisitId={}",
            patient_id, patient_visit_id
        );
        self.client
            .fetch(Capability::ConsumptionsOfPatient, &path, None)
            .await
    }

    pub async fn returns(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(
                Capability::ReturnConsumptions,
                "/PatientConsumption/Returns",
                None,
            )
            .await
    }
}
