use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee master record. Column and JSON key spelling (`epfNo`,
/// `basicSalary`) is kept as the frontend and existing databases expect it.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "epfNo": "EPF-1001",
        "name": "John Doe",
        "nic": "901234567V",
        "department": "Production",
        "position": "Machine Operator",
        "employee_type": "permanent",
        "epf_active": "yes",
        "address": "12 Main St",
        "phone": "+94771234567",
        "gender": "male",
        "dob": "1990-05-14",
        "basicSalary": 50000.0,
        "allowance": 2000.0,
        "pra": 500.0,
        "incentive": 1000.0
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[sqlx(rename = "epfNo")]
    #[serde(rename = "epfNo")]
    #[schema(example = "EPF-1001")]
    pub epf_no: Option<String>,

    #[schema(example = "John Doe")]
    pub name: Option<String>,

    pub nic: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employee_type: Option<String>,
    pub epf_active: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,

    #[schema(example = "1990-05-14")]
    pub dob: Option<String>,

    #[sqlx(rename = "basicSalary")]
    #[serde(rename = "basicSalary")]
    #[schema(example = 50000.0)]
    pub basic_salary: f64,

    #[schema(example = 2000.0)]
    pub allowance: f64,

    #[schema(example = 500.0)]
    pub pra: f64,

    #[schema(example = 1000.0)]
    pub incentive: f64,
}
