use chrono::NaiveDate;
use tracing::debug;

use shared_client::HospitalApiClient;
use shared_config::QUERY_DATE_FORMAT;
use shared_models::{ApiResult, Capability, NormalizedResponse};

/// Stock, store and dispensary requisition endpoints.
pub struct InventoryService {
    client: HospitalApiClient,
}

impl InventoryService {
    pub fn new(client: HospitalApiClient) -> Self {
        Self { client }
    }

    pub fn requisitions_path(dispensary_id: u64, from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "/DispensaryRequisition/Dispensary/{}?FromDate={}&ToDate={}",
            dispensary_id,
            from.format(QUERY_DATE_FORMAT),
            to.format(QUERY_DATE_FORMAT)
        )
    }

    pub async fn all_stocks(&self) -> ApiResult<NormalizedResponse> {
        debug!("Fetching all stock details");
        self.client
            .fetch(Capability::AllStocks, "/PharmacyStock/AllStockDetails", None)
            .await
    }

    pub async fn main_store(&self) -> ApiResult<NormalizedResponse> {
        self.client
            .fetch(Capability::MainStore, "/PharmacySettings/MainStore", None)
            .await
    }

    pub async fn requisitions_by_date_range(
        &self,
        dispensary_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<NormalizedResponse> {
        debug!(
            "Fetching requisitions for dispensary {} between {} and {}",
            dispensary_id, from, to
        );

        let path = Self::requisitions_path(dispensary_id, from, to);
        self.client
            .fetch(Capability::RequisitionByDateRange, &path, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requisition_path_formats_dates() {
        let from = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 11, 19).unwrap();

        assert_eq!(
            InventoryService::requisitions_path(1, from, to),
            "/DispensaryRequisition/Dispensary/1?FromDate=2020-01-01&ToDate=2024-11-19"
        );
    }
}
