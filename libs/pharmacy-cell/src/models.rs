use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Requisition {
    pub requisition_id: u64,
    #[serde(rename = "RequistionNo")]
    pub requisition_no: Option<Value>,
    pub requisition_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatientConsumption {
    pub patient_consumption_id: u64,
    pub consumption_receipt_no: Option<Value>,
    pub total_amount: Option<f64>,
    pub item_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumptionReturn {
    pub consumption_return_receipt_no: u64,
    pub hospital_no: Option<String>,
    pub patient_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingScheme {
    pub scheme_id: Value,
    pub scheme_code: Option<String>,
    pub scheme_name: Option<String>,
    pub community_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingSummary {
    pub patient_id: Value,
    pub credit_amount: Option<f64>,
    pub provisional_amt: Option<f64>,
    pub total_due: Option<f64>,
}
