use futures::FutureExt;

use shared_client::HospitalApiClient;
use shared_config::{SuiteParameters, DEFAULT_SUITE_GROUP};
use shared_models::{ApiResult, Capability, NormalizedResponse};
use validation_cell::{
    assert_fields_valid, assert_non_null, assert_null, assert_status_ok, assert_unique,
    list_payload, Scenario,
};

use crate::models::{AdmittedPatient, DischargedPatient};
use crate::services::AdmissionService;

pub async fn discharged_patients(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = AdmissionService::new(client.clone())
        .discharged_patients(params.from_date, params.to_date)
        .await?;
    assert_status_ok(&response)?;
    assert_fields_valid(Capability::DischargedPatients, &response)?;

    assert_non_null(
        list_payload(&response)?,
        &["PatientVisitId", "PatientAdmissionId", "PatientId"],
    )?;

    let patients: Vec<DischargedPatient> = response.payload().rows()?;
    assert_unique(patients.iter().map(|p| p.patient_visit_id), "PatientVisitId")?;
    assert_unique(
        patients.iter().map(|p| p.patient_admission_id),
        "PatientAdmissionId",
    )?;

    Ok(response)
}

pub async fn admitted_patients(
    client: &HospitalApiClient,
    _params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = AdmissionService::new(client.clone())
        .admitted_patients()
        .await?;
    assert_status_ok(&response)?;
    assert_fields_valid(Capability::AdmittedPatients, &response)?;

    let items = list_payload(&response)?;
    assert_non_null(items, &["PatientId", "VisitId"])?;
    assert_null(items, "DischargeDate")?;

    let patients: Vec<AdmittedPatient> = response.payload().rows()?;
    assert_unique(patients.iter().map(|p| p.patient_id), "PatientId")?;
    assert_unique(patients.iter().map(|p| p.visit_id), "VisitId")?;

    Ok(response)
}

pub async fn ipd_patient_search(
    client: &HospitalApiClient,
    params: &SuiteParameters,
) -> ApiResult<NormalizedResponse> {
    let response = AdmissionService::new(client.clone())
        .search_ipd_patients(&params.ipd_search_name)
        .await?;
    assert_status_ok(&response)?;
    assert_fields_valid(Capability::IpdPatientSearch, &response)?;

    assert_non_null(list_payload(&response)?, &["PatientId", "PatientCode"])?;

    Ok(response)
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            priority: 10,
            group: DEFAULT_SUITE_GROUP,
            name: "discharged_patients",
            capability: Capability::DischargedPatients,
            description: "Discharged patients in range have unique visit and admission ids",
            run: |client, params| discharged_patients(client, params).boxed(),
        },
        Scenario {
            priority: 11,
            group: DEFAULT_SUITE_GROUP,
            name: "admitted_patients",
            capability: Capability::AdmittedPatients,
            description: "Admitted patients are unique and have no discharge date",
            run: |client, params| admitted_patients(client, params).boxed(),
        },
        Scenario {
            priority: 12,
            group: DEFAULT_SUITE_GROUP,
            name: "ipd_patient_search",
            capability: Capability::IpdPatientSearch,
            description: "IPD search by name returns patients with id and code",
            run: |client, params| ipd_patient_search(client, params).boxed(),
        },
    ]
}
