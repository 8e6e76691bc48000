use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionalItem {
    pub patient_id: Value,
    pub item_name: Option<String>,
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingUser {
    pub user_id: u64,
    pub short_name: String,
    pub department_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FiscalYear {
    pub fiscal_year_id: u64,
    pub fiscal_year_name: String,
}
