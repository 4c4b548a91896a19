use actix_web::{HttpResponse, Responder, web};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::error;

use crate::model::employee::Employee;
use crate::utils::coerce::{field_num, field_str};

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = Object,
    responses(
        (status = 200, description = "Employee created", body = Object, example = json!({
            "message": "Employee added", "id": 1
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<Value>,
) -> impl Responder {
    let d = payload.into_inner();

    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (epfNo, name, nic, department, position, employee_type, epf_active, address, phone, gender, dob,
         basicSalary, allowance, pra, incentive)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(field_str(&d, "epfNo"))
    .bind(field_str(&d, "name"))
    .bind(field_str(&d, "nic"))
    .bind(field_str(&d, "department"))
    .bind(field_str(&d, "position"))
    .bind(field_str(&d, "employee_type"))
    .bind(field_str(&d, "epf_active"))
    .bind(field_str(&d, "address"))
    .bind(field_str(&d, "phone"))
    .bind(field_str(&d, "gender"))
    .bind(field_str(&d, "dob"))
    .bind(field_num(&d, "basicSalary"))
    .bind(field_num(&d, "allowance"))
    .bind(field_num(&d, "pra"))
    .bind(field_num(&d, "incentive"))
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => HttpResponse::Ok().json(json!({
            "message": "Employee added",
            "id": res.last_insert_rowid()
        })),
        Err(e) => {
            error!(error = %e, "Failed to insert employee");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// List all employees, newest first
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> impl Responder {
    let result = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id DESC")
        .fetch_all(pool.get_ref())
        .await;

    match result {
        Ok(employees) => HttpResponse::Ok().json(employees),
        Err(e) => {
            error!(error = %e, "Failed to list employees");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn get_employee(pool: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    let result = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await;

    match result {
        Ok(Some(employee)) => HttpResponse::Ok().json(employee),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Employee not found" })),
        Err(e) => {
            error!(error = %e, id, "Failed to fetch employee");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Replace an employee's profile. Fields absent from the body become NULL;
/// salary figures coerce to 0.
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated", body = Object, example = json!({
            "message": "Employee updated"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> impl Responder {
    let id = path.into_inner();
    let d = payload.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE employees SET
            epfNo = ?, name = ?, nic = ?, department = ?, position = ?,
            employee_type = ?, epf_active = ?, address = ?, phone = ?,
            gender = ?, dob = ?, basicSalary = ?, allowance = ?, pra = ?, incentive = ?
        WHERE id = ?
        "#,
    )
    .bind(field_str(&d, "epfNo"))
    .bind(field_str(&d, "name"))
    .bind(field_str(&d, "nic"))
    .bind(field_str(&d, "department"))
    .bind(field_str(&d, "position"))
    .bind(field_str(&d, "employee_type"))
    .bind(field_str(&d, "epf_active"))
    .bind(field_str(&d, "address"))
    .bind(field_str(&d, "phone"))
    .bind(field_str(&d, "gender"))
    .bind(field_str(&d, "dob"))
    .bind(field_num(&d, "basicSalary"))
    .bind(field_num(&d, "allowance"))
    .bind(field_num(&d, "pra"))
    .bind(field_num(&d, "incentive"))
    .bind(id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return HttpResponse::NotFound().json(json!({ "error": "Employee not found" }));
            }
            HttpResponse::Ok().json(json!({ "message": "Employee updated" }))
        }
        Err(e) => {
            error!(error = %e, id, "Failed to update employee");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee deleted"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(pool: web::Data<SqlitePool>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return HttpResponse::NotFound().json(json!({ "error": "Employee not found" }));
            }
            HttpResponse::Ok().json(json!({ "message": "Employee deleted" }))
        }
        Err(e) => {
            error!(error = %e, id, "Failed to delete employee");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
