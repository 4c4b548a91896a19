use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceEntry, AttendanceSummary};
use crate::payroll::store::month_range;
use crate::utils::coerce::num_or_zero;

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = 1)]
    pub employee_id: Option<i64>,

    #[schema(example = "2026-01-15", format = "date")]
    pub date: Option<String>,

    #[schema(example = "present")]
    pub status: Option<String>,

    #[serde(default)]
    #[schema(example = 2.5, value_type = f64)]
    pub ot_hours: Value,

    pub note: Option<String>,
}

/// Record one attendance day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 200, description = "Entry saved", body = Object, example = json!({
            "message": "Attendance saved", "id": 1
        })),
        (status = 400, description = "employee_id, date or status missing"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAttendance>,
) -> impl Responder {
    let p = payload.into_inner();

    let (Some(employee_id), Some(date), Some(status)) = (
        p.employee_id.filter(|v| *v != 0),
        p.date.filter(|d| !d.is_empty()),
        p.status.filter(|s| !s.is_empty()),
    ) else {
        return HttpResponse::BadRequest().json(json!({
            "error": "employee_id, date and status required"
        }));
    };

    let result = sqlx::query(
        "INSERT INTO attendance (employee_id, date, status, ot_hours, note) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(employee_id)
    .bind(date)
    .bind(status)
    .bind(num_or_zero(&p.ot_hours))
    .bind(p.note)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => HttpResponse::Ok().json(json!({
            "message": "Attendance saved",
            "id": res.last_insert_rowid()
        })),
        Err(e) => {
            error!(error = %e, employee_id, "Failed to insert attendance");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

async fn month_entries(
    pool: &SqlitePool,
    employee_id: i64,
    year: i64,
    month: i64,
) -> Result<Vec<AttendanceEntry>, sqlx::Error> {
    let (start, end) = month_range(year, month);

    sqlx::query_as::<_, AttendanceEntry>(
        "SELECT * FROM attendance WHERE employee_id = ? AND date BETWEEN ? AND ? ORDER BY date",
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Attendance entries for an employee's month
#[utoipa::path(
    get,
    path = "/api/attendance/list/{employee_id}/{year}/{month}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("year", Path, description = "Year, e.g. 2026"),
        ("month", Path, description = "Month 1-12")
    ),
    responses(
        (status = 200, description = "Entries ordered by date", body = Vec<AttendanceEntry>),
        (status = 500, description = "Storage failure")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<(i64, i64, i64)>,
) -> impl Responder {
    let (employee_id, year, month) = path.into_inner();

    match month_entries(pool.get_ref(), employee_id, year, month).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            error!(error = %e, employee_id, "Failed to list attendance");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Month entries plus aggregated status counts and overtime hours
#[utoipa::path(
    get,
    path = "/api/attendance/summary/{employee_id}/{year}/{month}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("year", Path, description = "Year, e.g. 2026"),
        ("month", Path, description = "Month 1-12")
    ),
    responses(
        (status = 200, description = "Rows and summary", body = Object, example = json!({
            "rows": [],
            "summary": { "present": 20, "absent": 2, "leave": 1, "ot_hours": 12.5, "days_count": 23 }
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    pool: web::Data<SqlitePool>,
    path: web::Path<(i64, i64, i64)>,
) -> impl Responder {
    let (employee_id, year, month) = path.into_inner();

    match month_entries(pool.get_ref(), employee_id, year, month).await {
        Ok(rows) => {
            let summary = AttendanceSummary::from_entries(&rows);
            HttpResponse::Ok().json(json!({ "rows": rows, "summary": summary }))
        }
        Err(e) => {
            error!(error = %e, employee_id, "Failed to summarize attendance");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Delete one attendance entry
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = Object, example = json!({
            "message": "Attendance deleted"
        })),
        (status = 404, description = "No such entry"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return HttpResponse::NotFound().json(json!({ "error": "Record not found" }));
            }
            HttpResponse::Ok().json(json!({ "message": "Attendance deleted" }))
        }
        Err(e) => {
            error!(error = %e, id, "Failed to delete attendance");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::db::test_pool;

    macro_rules! attendance_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool.clone()))
                    .route("/api/attendance", web::post().to(create_attendance))
                    .route(
                        "/api/attendance/list/{employee_id}/{year}/{month}",
                        web::get().to(list_attendance),
                    )
                    .route(
                        "/api/attendance/summary/{employee_id}/{year}/{month}",
                        web::get().to(attendance_summary),
                    )
                    .route("/api/attendance/{id}", web::delete().to(delete_attendance)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_requires_identity_date_and_status() {
        let pool = test_pool().await;
        let app = attendance_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({ "employee_id": 1, "date": "2026-01-15" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn month_flow_lists_and_summarizes() {
        let pool = test_pool().await;
        let app = attendance_app!(pool);

        for (date, status, ot) in [
            ("2026-01-05", "present", json!(2)),
            ("2026-01-06", "Present", json!("1.5")),
            ("2026-01-07", "ABSENT", json!(null)),
            ("2026-01-08", "leave", json!(0)),
            ("2026-02-01", "present", json!(9)),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/attendance")
                .set_json(json!({
                    "employee_id": 1, "date": date, "status": status, "ot_hours": ot
                }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["message"], "Attendance saved");
        }

        let req = test::TestRequest::get()
            .uri("/api/attendance/list/1/2026/1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["date"], "2026-01-05");

        let req = test::TestRequest::get()
            .uri("/api/attendance/summary/1/2026/1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["present"], 2);
        assert_eq!(body["summary"]["absent"], 1);
        assert_eq!(body["summary"]["leave"], 1);
        assert_eq!(body["summary"]["ot_hours"], 3.5);
        assert_eq!(body["summary"]["days_count"], 4);
    }

    #[actix_web::test]
    async fn delete_reports_missing_entries() {
        let pool = test_pool().await;
        let app = attendance_app!(pool);

        let req = test::TestRequest::delete()
            .uri("/api/attendance/42")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
