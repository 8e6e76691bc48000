use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharmacy_cell::scenarios;
use pharmacy_cell::{ConsumptionService, InventoryService};
use shared_client::{HospitalApiClient, RecordingTransport, ReqwestTransport, StaticTokenProvider};
use shared_config::SuiteParameters;
use shared_models::{ApiError, Capability};
use shared_utils::test_utils::{MockHospitalResponses, TestConfig};

async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    let fixtures = [
        ("/PharmacyStock/AllStockDetails", Capability::AllStocks),
        ("/PharmacySettings/MainStore", Capability::MainStore),
        ("/DispensaryRequisition/Dispensary/1", Capability::RequisitionByDateRange),
        ("/PatientConsumption/PatientConsumptions", Capability::PatientConsumptions),
        ("/PatientConsumption/PatientConsumptionInfo", Capability::PatientConsumptionInfo),
        ("/PatientConsumption/PharmacyIpBillingScheme", Capability::BillingSchemeBySchemeId),
        ("/PharmacySales/PatientBillingSummary", Capability::BillingSummaryByPatientId),
        ("/PatientConsumption/ConsumptionsOfPatient", Capability::ConsumptionsOfPatient),
        ("/PatientConsumption/Returns", Capability::ReturnConsumptions),
    ];

    for (endpoint, capability) in fixtures {
        mount_json(server, endpoint, MockHospitalResponses::for_capability(capability)).await;
    }
}

fn client_for(server: &MockServer) -> HospitalApiClient {
    HospitalApiClient::new(&TestConfig::default().to_app_config(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_all_pharmacy_scenarios_pass_against_fixtures() {
    let mock_server = MockServer::start().await;
    mount_all(&mock_server).await;

    let client = client_for(&mock_server);
    let params = SuiteParameters::default();

    for scenario in scenarios() {
        let result = scenario.execute(&client, &params).await;
        assert!(result.is_ok(), "{} failed: {:?}", scenario.name, result.err());
    }
}

#[test]
fn test_registry_covers_pharmacy_capabilities_in_order() {
    let registered = scenarios();
    let priorities: Vec<u32> = registered.iter().map(|s| s.priority).collect();

    assert_eq!(priorities, (1..=9).collect::<Vec<u32>>());
    assert!(registered.iter().all(|s| s.in_group("PL1")));
    assert_eq!(registered[2].capability, Capability::RequisitionByDateRange);
}

#[tokio::test]
async fn test_requisition_query_carries_date_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/DispensaryRequisition/Dispensary/1"))
        .and(query_param("FromDate", "2020-01-01"))
        .and(query_param("ToDate", "2024-11-19"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockHospitalResponses::requisitions()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = SuiteParameters::default();
    let response = InventoryService::new(client_for(&mock_server))
        .requisitions_by_date_range(params.dispensary_id, params.from_date, params.to_date)
        .await
        .unwrap();

    assert_eq!(response.list_results().unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_requisition_ids_fail() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/DispensaryRequisition/Dispensary/1",
        MockHospitalResponses::envelope(json!({
            "requisitionList": [
                {"RequisitionId": 31, "RequistionNo": 1, "RequisitionStatus": "active"},
                {"RequisitionId": 31, "RequistionNo": 2, "RequisitionStatus": "active"}
            ]
        })),
    )
    .await;

    let result = scenarios::requisitions_by_date_range(
        &client_for(&mock_server),
        &SuiteParameters::default(),
    )
    .await;

    assert_matches!(result, Err(ApiError::Assertion(message)) if message.contains("RequisitionId"));
}

#[tokio::test]
async fn test_scheme_id_must_echo_request() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/PatientConsumption/PharmacyIpBillingScheme",
        MockHospitalResponses::billing_scheme(7),
    )
    .await;

    let result =
        scenarios::billing_scheme(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(result, Err(ApiError::Assertion(message)) if message.contains("SchemeId"));
}

#[tokio::test]
async fn test_missing_stock_field_fails_validation() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/PharmacyStock/AllStockDetails",
        MockHospitalResponses::envelope(json!([
            {"ItemId": 1, "ItemName": "A", "GenericName": "a", "SalePrice": 1.0}
        ])),
    )
    .await;

    let result =
        scenarios::all_stocks(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(result, Err(ApiError::Assertion(message)) if message.contains("CostPrice"));
}

#[tokio::test]
async fn test_consumption_info_requires_nested_record() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/PatientConsumption/PatientConsumptionInfo",
        MockHospitalResponses::envelope(json!({"PatientConsumptionItems": []})),
    )
    .await;

    let result =
        scenarios::consumption_info(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(result, Err(ApiError::Assertion(_)));
}

#[tokio::test]
async fn test_consumption_service_issues_one_get_per_call() {
    let mock_server = MockServer::start().await;
    mount_all(&mock_server).await;

    let transport = RecordingTransport::new(ReqwestTransport::new());
    let log = transport.call_log();
    let client = HospitalApiClient::with_transport(
        &mock_server.uri(),
        Arc::new(transport),
        Arc::new(StaticTokenProvider::new("test-token")),
    )
    .unwrap();

    let service = ConsumptionService::new(client.clone());
    service.consumptions_of_patient(114, 53).await.unwrap();

    log.assert_single_fetch(
        &client.url_for("/PatientConsumption/ConsumptionsOfPatient?patientId=114&patientVisitId=53"),
        false,
    )
    .unwrap();
}

#[tokio::test]
async fn test_duplicate_consumption_ids_fail() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/PatientConsumption/ConsumptionsOfPatient",
        MockHospitalResponses::envelope(json!([
            {"PatientConsumptionId": 7, "ConsumptionReceiptNo": 1, "TotalAmount": 10.0, "ItemName": "A"},
            {"PatientConsumptionId": 7, "ConsumptionReceiptNo": 2, "TotalAmount": 12.5, "ItemName": "B"}
        ])),
    )
    .await;

    let result =
        scenarios::consumptions_of_patient(&client_for(&mock_server), &SuiteParameters::default())
            .await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message)) if message.contains("duplicate PatientConsumptionId: 7")
    );
}

#[tokio::test]
async fn test_duplicate_return_receipts_fail() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/PatientConsumption/Returns",
        MockHospitalResponses::envelope(json!([
            {"ConsumptionReturnReceiptNo": 5, "HospitalNo": "2311000114", "PatientId": 114},
            {"ConsumptionReturnReceiptNo": 5, "HospitalNo": "2311000120", "PatientId": 120}
        ])),
    )
    .await;

    let result =
        scenarios::return_consumptions(&client_for(&mock_server), &SuiteParameters::default())
            .await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message))
            if message.contains("duplicate ConsumptionReturnReceiptNo: 5")
    );
}

#[tokio::test]
async fn test_billing_summary_for_other_patient_fails() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/PharmacySales/PatientBillingSummary",
        MockHospitalResponses::billing_summary(999),
    )
    .await;

    let result =
        scenarios::billing_summary(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message)) if message.contains("PatientId is 999, expected 114")
    );
}
