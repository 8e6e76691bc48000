use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DischargedPatient {
    pub visit_code: Option<String>,
    pub patient_visit_id: u64,
    pub patient_admission_id: u64,
    pub patient_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdmittedPatient {
    pub patient_id: u64,
    pub visit_id: u64,
    #[serde(default)]
    pub discharge_date: Option<String>,
}
