use chrono::NaiveDate;
use tracing::debug;

use shared_client::HospitalApiClient;
use shared_config::QUERY_DATE_FORMAT;
use shared_models::{ApiResult, Capability, NormalizedResponse};

const DISCHARGED: &str = "discharged";

pub struct AdmissionService {
    client: HospitalApiClient,
}

impl AdmissionService {
    pub fn new(client: HospitalApiClient) -> Self {
        Self { client }
    }

    pub fn discharged_path(from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "/Admission/DischargedPatients?admissionStatus={}&FromDate={}&ToDate={}",
            DISCHARGED,
            from.format(QUERY_DATE_FORMAT),
            to.format(QUERY_DATE_FORMAT)
        )
    }

    pub fn ipd_search_path(search: &str) -> String {
        format!("/Patient/IPDPatientSearch?search={}", urlencoding::encode(search))
    }

    pub async fn discharged_patients(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<NormalizedResponse> {
        debug!("Fetching patients discharged between {} and {}", from, to);

        let path = Self::discharged_path(from, to);
        self.client
            .fetch(Capability::DischargedPatients, &path, None)
            .await
    }

    pub async fn admitted_patients(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(Capability::AdmittedPatients, "/IpBilling/AdmittedPatients", None)
            .await
    }

    pub async fn search_ipd_patients(&self, search: &str) -> ApiResult<NormalizedResponse> {
        debug!("Searching IPD patients for '{}'", search);

        let path = Self::ipd_search_path(search);
        self.client
            .fetch(Capability::IpdPatientSearch, &path, None)
            .await
    }
}
