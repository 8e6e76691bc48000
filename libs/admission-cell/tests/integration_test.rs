use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use admission_cell::scenarios;
use shared_client::HospitalApiClient;
use shared_config::SuiteParameters;
use shared_models::{ApiError, Capability};
use shared_utils::test_utils::{MockHospitalResponses, TestConfig};

fn client_for(server: &MockServer) -> HospitalApiClient {
    HospitalApiClient::new(&TestConfig::default().to_app_config(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_all_admission_scenarios_pass_against_fixtures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Admission/DischargedPatients"))
        .and(query_param("admissionStatus", "discharged"))
        .and(query_param("FromDate", "2020-01-01"))
        .and(query_param("ToDate", "2024-11-19"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockHospitalResponses::discharged_patients()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/IpBilling/AdmittedPatients"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockHospitalResponses::admitted_patients()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Patient/IPDPatientSearch"))
        .and(query_param("search", "Devid8 Roy8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockHospitalResponses::ipd_patient_search()),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = SuiteParameters::default();

    for scenario in scenarios() {
        let result = scenario.execute(&client, &params).await;
        assert!(result.is_ok(), "{} failed: {:?}", scenario.name, result.err());
    }
}

#[tokio::test]
async fn test_admitted_patient_with_discharge_date_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IpBilling/AdmittedPatients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockHospitalResponses::envelope(
            json!([{"PatientId": 1, "VisitId": 2, "DischargeDate": "2024-11-20T10:00:00"}]),
        )))
        .mount(&mock_server)
        .await;

    let result =
        scenarios::admitted_patients(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(result, Err(ApiError::Assertion(message)) if message.contains("DischargeDate"));
}

#[tokio::test]
async fn test_duplicate_admission_ids_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Admission/DischargedPatients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockHospitalResponses::envelope(
            json!([
                {"VisitCode": "H1", "PatientVisitId": 1, "PatientAdmissionId": 5, "PatientId": 9},
                {"VisitCode": "H2", "PatientVisitId": 2, "PatientAdmissionId": 5, "PatientId": 9}
            ]),
        )))
        .mount(&mock_server)
        .await;

    let result =
        scenarios::discharged_patients(&client_for(&mock_server), &SuiteParameters::default())
            .await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message)) if message.contains("PatientAdmissionId")
    );
}

#[tokio::test]
async fn test_ipd_search_with_error_status_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Patient/IPDPatientSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": "Failed",
            "Results": []
        })))
        .mount(&mock_server)
        .await;

    let result =
        scenarios::ipd_patient_search(&client_for(&mock_server), &SuiteParameters::default())
            .await;

    assert_matches!(result, Err(ApiError::Assertion(_)));
}

#[test]
fn test_registry_priorities_follow_pharmacy() {
    let registered = scenarios();
    assert_eq!(
        registered.iter().map(|s| s.priority).collect::<Vec<_>>(),
        vec![10, 11, 12]
    );
    assert_eq!(registered[1].capability, Capability::AdmittedPatients);
}

#[tokio::test]
async fn test_duplicate_discharged_visit_ids_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Admission/DischargedPatients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockHospitalResponses::envelope(
            json!([
                {"VisitCode": "H1", "PatientVisitId": 41, "PatientAdmissionId": 7, "PatientId": 98},
                {"VisitCode": "H2", "PatientVisitId": 41, "PatientAdmissionId": 8, "PatientId": 101}
            ]),
        )))
        .mount(&mock_server)
        .await;

    let result =
        scenarios::discharged_patients(&client_for(&mock_server), &SuiteParameters::default())
            .await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message)) if message.contains("duplicate PatientVisitId: 41")
    );
}

#[tokio::test]
async fn test_duplicate_admitted_patient_ids_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IpBilling/AdmittedPatients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockHospitalResponses::envelope(
            json!([
                {"PatientId": 114, "VisitId": 53, "DischargeDate": null},
                {"PatientId": 114, "VisitId": 90}
            ]),
        )))
        .mount(&mock_server)
        .await;

    let result =
        scenarios::admitted_patients(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message)) if message.contains("duplicate PatientId: 114")
    );
}

#[tokio::test]
async fn test_duplicate_admitted_visit_ids_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/IpBilling/AdmittedPatients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockHospitalResponses::envelope(
            json!([
                {"PatientId": 114, "VisitId": 53},
                {"PatientId": 188, "VisitId": 53}
            ]),
        )))
        .mount(&mock_server)
        .await;

    let result =
        scenarios::admitted_patients(&client_for(&mock_server), &SuiteParameters::default()).await;

    assert_matches!(
        result,
        Err(ApiError::Assertion(message)) if message.contains("duplicate VisitId: 53")
    );
}
