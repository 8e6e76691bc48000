use shared_client::HospitalApiClient;
use shared_models::{ApiResult, Capability, NormalizedResponse};

/// Reference data under `/Billing`: providers, users and the fiscal year.
pub struct BillingSettingsService {
    client: HospitalApiClient,
}

impl BillingSettingsService {
    pub fn new(client: HospitalApiClient) -> Self {
        Self { client }
    }

    pub async fn providers(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(Capability::ProviderList, "/Billing/GetProviderList", None)
            .await
    }

    pub async fn users(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(Capability::UsersList, "/Billing/ListUsers", None)
            .await
    }

    pub async fn current_fiscal_year(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(Capability::CurrentFiscalYear, "/Billing/CurrentFiscalYear", None)
            .await
    }
}
