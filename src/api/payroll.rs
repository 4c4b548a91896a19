use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::payroll::calculator::{self, ContributionRates, SalaryBase};
use crate::payroll::generator::{self, BatchReport};
use crate::payroll::store::{self, SettingsInput, SettingsWrite};
use crate::model::payroll::{MonthlyPayrollRow, NewPayrollRecord};
use crate::utils::coerce::{field_int, field_num, num_or_zero};

#[derive(Deserialize, ToSchema)]
pub struct SettingsPayload {
    #[serde(default)]
    #[schema(example = 8.0, value_type = f64)]
    pub epf_employee: Value,

    #[serde(default)]
    #[schema(example = 12.0, value_type = f64)]
    pub epf_company: Value,

    #[serde(default)]
    #[schema(example = 3.0, value_type = f64)]
    pub etf: Value,

    #[schema(example = 2026)]
    pub year: Option<i64>,

    #[schema(example = 1)]
    pub month: Option<i64>,

    #[serde(default)]
    #[schema(example = 100.0, value_type = f64)]
    pub ot_rate: Value,
}

#[derive(Deserialize, ToSchema)]
pub struct CalculateRequest {
    #[serde(rename = "employeeId")]
    #[schema(example = 1)]
    pub employee_id: Option<i64>,

    #[schema(example = 2026)]
    pub year: Option<i64>,

    #[schema(example = 1)]
    pub month: Option<i64>,

    #[serde(default)]
    #[schema(example = 10.0, value_type = f64)]
    pub ot_hours: Value,
}

#[derive(Deserialize, IntoParams)]
pub struct RecordsQuery {
    pub year: Option<i64>,
    pub month: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateRequest {
    #[schema(example = 2026)]
    pub year: Option<i64>,

    #[schema(example = 1)]
    pub month: Option<i64>,
}

/// Fields a saved record cannot go without. Presence is what is checked; a
/// JSON null still counts as present.
const REQUIRED_SAVE_FIELDS: [&str; 4] = ["employee_id", "year", "month", "net_amount"];

/// Upsert the payroll settings row
#[utoipa::path(
    post,
    path = "/api/payroll/settings",
    request_body = SettingsPayload,
    responses(
        (status = 200, description = "Settings saved or updated", body = Object, example = json!({
            "success": true, "message": "Settings saved", "id": 1
        })),
        (status = 400, description = "Year or month missing", body = Object, example = json!({
            "success": false, "message": "Year and month required"
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Payroll Settings"
)]
pub async fn save_settings(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SettingsPayload>,
) -> impl Responder {
    let p = payload.into_inner();

    let (Some(year), Some(month)) = (
        p.year.filter(|v| *v != 0),
        p.month.filter(|v| *v != 0),
    ) else {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Year and month required"
        }));
    };

    let input = SettingsInput {
        epf_employee: num_or_zero(&p.epf_employee),
        epf_company: num_or_zero(&p.epf_company),
        etf: num_or_zero(&p.etf),
        year,
        month,
        ot_rate: num_or_zero(&p.ot_rate),
    };

    match store::save_settings(pool.get_ref(), &input).await {
        Ok(SettingsWrite::Inserted(id)) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Settings saved",
            "id": id
        })),
        Ok(SettingsWrite::Updated) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Settings updated"
        })),
        Err(e) => {
            error!(error = %e, "Failed to save payroll settings");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Latest payroll settings, `{}` when none exist yet
#[utoipa::path(
    get,
    path = "/api/payroll/settings/latest",
    responses(
        (status = 200, description = "Latest settings row or an empty object"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Payroll Settings"
)]
pub async fn latest_settings(pool: web::Data<SqlitePool>) -> impl Responder {
    match store::latest_settings(pool.get_ref()).await {
        Ok(Some(settings)) => HttpResponse::Ok().json(settings),
        Ok(None) => HttpResponse::Ok().json(json!({})),
        Err(e) => {
            error!(error = %e, "Failed to load payroll settings");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Preview one employee's payroll without persisting anything
#[utoipa::path(
    post,
    path = "/api/payroll/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Full payroll breakdown", body = Object, example = json!({
            "employee": { "id": 1, "name": "John Doe", "epfNo": "EPF-1001" },
            "year": 2026, "month": 1,
            "basicSalary": 50000.0, "allowance": 2000.0, "pra": 500.0, "incentive": 1000.0,
            "ot_hours": 10.0, "ot_amount": 1000.0,
            "epf_employee_pct": 8.0, "epf_company_pct": 12.0, "etf_pct": 3.0,
            "epf_employee_amount": 4000.0, "epf_company_amount": 6000.0, "etf_amount": 1500.0,
            "gross_amount": 54500.0, "deductions": 4000.0, "net_amount": 50500.0
        })),
        (status = 400, description = "Missing identifiers"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Payroll"
)]
pub async fn calculate_payroll(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CalculateRequest>,
) -> impl Responder {
    let p = payload.into_inner();

    let (Some(employee_id), Some(year), Some(month)) = (
        p.employee_id.filter(|v| *v != 0),
        p.year.filter(|v| *v != 0),
        p.month.filter(|v| *v != 0),
    ) else {
        return HttpResponse::BadRequest().json(json!({
            "error": "employeeId, year and month required"
        }));
    };

    let employee = match store::employee_by_id(pool.get_ref(), employee_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "Employee not found" }));
        }
        Err(e) => {
            error!(error = %e, employee_id, "Failed to fetch employee");
            return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
        }
    };

    let settings = match store::latest_settings(pool.get_ref()).await {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Failed to load payroll settings");
            return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
        }
    };

    let rates = ContributionRates::from(settings);
    let ot_hours = num_or_zero(&p.ot_hours);
    let base = SalaryBase::from(&employee);
    let breakdown = calculator::calculate(&base, ot_hours, &rates);

    HttpResponse::Ok().json(json!({
        "employee": { "id": employee.id, "name": employee.name, "epfNo": employee.epf_no },
        "year": year,
        "month": month,
        "basicSalary": base.basic_salary,
        "allowance": base.allowance,
        "pra": base.pra,
        "incentive": base.incentive,
        "ot_hours": ot_hours,
        "ot_amount": breakdown.ot_amount,
        "epf_employee_pct": rates.epf_employee_pct,
        "epf_company_pct": rates.epf_company_pct,
        "etf_pct": rates.etf_pct,
        "epf_employee_amount": breakdown.epf_employee_amount,
        "epf_company_amount": breakdown.epf_company_amount,
        "etf_amount": breakdown.etf_amount,
        "gross_amount": breakdown.gross_amount,
        "deductions": breakdown.deductions,
        "net_amount": breakdown.net_amount
    }))
}

/// Persist one already-computed payroll record
#[utoipa::path(
    post,
    path = "/api/payroll/save",
    request_body = Object,
    responses(
        (status = 200, description = "Record saved", body = Object, example = json!({
            "message": "Payroll record saved", "id": 1
        })),
        (status = 400, description = "A required field is absent", body = Object, example = json!({
            "error": "Missing net_amount"
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Payroll"
)]
pub async fn save_record(
    pool: web::Data<SqlitePool>,
    payload: web::Json<Value>,
) -> impl Responder {
    let p = payload.into_inner();

    for field in REQUIRED_SAVE_FIELDS {
        if p.get(field).is_none() {
            return HttpResponse::BadRequest().json(json!({ "error": format!("Missing {field}") }));
        }
    }

    let record = NewPayrollRecord {
        employee_id: field_int(&p, "employee_id"),
        year: field_int(&p, "year"),
        month: field_int(&p, "month"),
        basic_salary: field_num(&p, "basicSalary"),
        allowance: field_num(&p, "allowance"),
        pra: field_num(&p, "pra"),
        incentive: field_num(&p, "incentive"),
        ot_hours: field_num(&p, "ot_hours"),
        ot_amount: field_num(&p, "ot_amount"),
        epf_employee_amount: field_num(&p, "epf_employee_amount"),
        epf_company_amount: field_num(&p, "epf_company_amount"),
        etf_amount: field_num(&p, "etf_amount"),
        gross_amount: field_num(&p, "gross_amount"),
        deductions: field_num(&p, "deductions"),
        net_amount: field_num(&p, "net_amount"),
    };

    match store::insert_record(pool.get_ref(), &record).await {
        Ok(id) => HttpResponse::Ok().json(json!({ "message": "Payroll record saved", "id": id })),
        Err(e) => {
            error!(error = %e, employee_id = record.employee_id, "Failed to save payroll record");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// A month's payroll records joined with employee identity
#[utoipa::path(
    get,
    path = "/api/payroll/records",
    params(RecordsQuery),
    responses(
        (status = 200, description = "Records for the month, ordered by employee name",
         body = Vec<MonthlyPayrollRow>),
        (status = 400, description = "Year or month missing"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Payroll"
)]
pub async fn list_records(
    pool: web::Data<SqlitePool>,
    query: web::Query<RecordsQuery>,
) -> impl Responder {
    let (Some(year), Some(month)) = (
        query.year.filter(|v| *v != 0),
        query.month.filter(|v| *v != 0),
    ) else {
        return HttpResponse::BadRequest().json(json!({ "error": "year and month required" }));
    };

    match store::records_for_month(pool.get_ref(), year, month).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            error!(error = %e, year, month, "Failed to list payroll records");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Generate and persist payroll records for every employee
#[utoipa::path(
    post,
    path = "/api/payroll/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Batch finished; one outcome per employee", body = Object, example = json!({
            "message": "Payroll generated",
            "details": [
                { "employee_id": 1, "payroll_id": 10 },
                { "employee_id": 2, "error": "write rejected" }
            ]
        })),
        (status = 400, description = "Year or month missing"),
        (status = 500, description = "Storage failure before the batch started")
    ),
    tag = "Payroll"
)]
pub async fn generate_payroll(
    pool: web::Data<SqlitePool>,
    payload: web::Json<GenerateRequest>,
) -> impl Responder {
    let (Some(year), Some(month)) = (
        payload.year.filter(|v| *v != 0),
        payload.month.filter(|v| *v != 0),
    ) else {
        return HttpResponse::BadRequest().json(json!({ "error": "year and month required" }));
    };

    match generator::generate_for_month(pool.get_ref(), year, month).await {
        Ok(BatchReport::NoEmployees) => HttpResponse::Ok().json(json!({ "message": "No employees" })),
        Ok(BatchReport::Completed(details)) => HttpResponse::Ok().json(json!({
            "message": "Payroll generated",
            "details": details
        })),
        Err(e) => {
            error!(error = %e, year, month, "Payroll generation failed");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
