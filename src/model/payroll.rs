use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contribution percentages and overtime rate. A single row is kept and
/// updated in place; the engine always reads the highest-id row and ignores
/// the year/month tags stored with it.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayrollSettings {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 8.0)]
    pub epf_employee: f64,

    #[schema(example = 12.0)]
    pub epf_company: f64,

    #[schema(example = 3.0)]
    pub etf: f64,

    #[schema(example = 2026)]
    pub year: Option<i64>,

    #[schema(example = 1)]
    pub month: Option<i64>,

    #[schema(example = 100.0)]
    pub ot_rate: f64,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,
}

/// A persisted payroll record. Created by the generator or the save
/// endpoint, never updated afterwards.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: i64,
    pub year: i64,
    pub month: i64,

    #[sqlx(rename = "basicSalary")]
    #[serde(rename = "basicSalary")]
    pub basic_salary: f64,
    pub allowance: f64,
    pub pra: f64,
    pub incentive: f64,

    pub ot_hours: f64,
    pub ot_amount: f64,
    pub epf_employee_amount: f64,
    pub epf_company_amount: f64,
    pub etf_amount: f64,
    pub gross_amount: f64,
    pub deductions: f64,
    pub net_amount: f64,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,
}

/// Field set for a record insert; the store assigns id and created_at.
#[derive(Debug)]
pub struct NewPayrollRecord {
    pub employee_id: i64,
    pub year: i64,
    pub month: i64,
    pub basic_salary: f64,
    pub allowance: f64,
    pub pra: f64,
    pub incentive: f64,
    pub ot_hours: f64,
    pub ot_amount: f64,
    pub epf_employee_amount: f64,
    pub epf_company_amount: f64,
    pub etf_amount: f64,
    pub gross_amount: f64,
    pub deductions: f64,
    pub net_amount: f64,
}

/// Record row joined with employee identity for the monthly listing.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct MonthlyPayrollRow {
    pub id: i64,
    pub employee_id: i64,
    pub year: i64,
    pub month: i64,

    #[sqlx(rename = "basicSalary")]
    #[serde(rename = "basicSalary")]
    pub basic_salary: f64,
    pub allowance: f64,
    pub pra: f64,
    pub incentive: f64,

    pub ot_hours: f64,
    pub ot_amount: f64,
    pub epf_employee_amount: f64,
    pub epf_company_amount: f64,
    pub etf_amount: f64,
    pub gross_amount: f64,
    pub deductions: f64,
    pub net_amount: f64,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,

    #[schema(example = "John Doe")]
    pub name: Option<String>,

    #[sqlx(rename = "epfNo")]
    #[serde(rename = "epfNo")]
    #[schema(example = "EPF-1001")]
    pub epf_no: Option<String>,

    #[schema(example = "Production")]
    pub department: Option<String>,
}
