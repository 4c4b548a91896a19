use futures_util::TryStreamExt;
use sqlx::SqlitePool;

use crate::model::employee::Employee;
use crate::model::payroll::{MonthlyPayrollRow, NewPayrollRecord, PayrollSettings};

/// Outcome of the single-row settings upsert.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingsWrite {
    Inserted(i64),
    Updated,
}

#[derive(Debug)]
pub struct SettingsInput {
    pub epf_employee: f64,
    pub epf_company: f64,
    pub etf: f64,
    pub year: i64,
    pub month: i64,
    pub ot_rate: f64,
}

/// Inclusive text window for a month. Day 31 is deliberate: dates are
/// compared as strings and no stored date can exceed the real month end.
pub fn month_range(year: i64, month: i64) -> (String, String) {
    (
        format!("{year}-{month:02}-01"),
        format!("{year}-{month:02}-31"),
    )
}

/// The most recently written settings row, if any.
pub async fn latest_settings(pool: &SqlitePool) -> Result<Option<PayrollSettings>, sqlx::Error> {
    sqlx::query_as::<_, PayrollSettings>("SELECT * FROM payroll_settings ORDER BY id DESC LIMIT 1")
        .fetch_optional(pool)
        .await
}

/// Keeps at most one settings row: inserts when the table is empty and
/// updates the existing row in place otherwise.
pub async fn save_settings(
    pool: &SqlitePool,
    input: &SettingsInput,
) -> Result<SettingsWrite, sqlx::Error> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM payroll_settings LIMIT 1")
        .fetch_optional(pool)
        .await?;

    match existing {
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO payroll_settings (epf_employee, epf_company, etf, year, month, ot_rate)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(input.epf_employee)
            .bind(input.epf_company)
            .bind(input.etf)
            .bind(input.year)
            .bind(input.month)
            .bind(input.ot_rate)
            .execute(pool)
            .await?;

            Ok(SettingsWrite::Inserted(result.last_insert_rowid()))
        }
        Some(id) => {
            sqlx::query(
                r#"
                UPDATE payroll_settings
                SET epf_employee = ?, epf_company = ?, etf = ?, year = ?, month = ?, ot_rate = ?
                WHERE id = ?
                "#,
            )
            .bind(input.epf_employee)
            .bind(input.epf_company)
            .bind(input.etf)
            .bind(input.year)
            .bind(input.month)
            .bind(input.ot_rate)
            .bind(id)
            .execute(pool)
            .await?;

            Ok(SettingsWrite::Updated)
        }
    }
}

pub async fn all_employees(pool: &SqlitePool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees")
        .fetch_all(pool)
        .await
}

pub async fn employee_by_id(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool)
        .await
}

/// Sums recorded overtime for one employee over the month window. Rows with
/// no ot_hours value count as 0; no rows at all sum to 0.
pub async fn sum_overtime_hours(
    pool: &SqlitePool,
    employee_id: i64,
    year: i64,
    month: i64,
) -> Result<f64, sqlx::Error> {
    let (start, end) = month_range(year, month);

    let mut rows = sqlx::query_scalar::<_, Option<f64>>(
        "SELECT ot_hours FROM attendance WHERE employee_id = ? AND date BETWEEN ? AND ?",
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch(pool);

    let mut total = 0.0;
    while let Some(hours) = rows.try_next().await? {
        total += hours.unwrap_or(0.0);
    }

    Ok(total)
}

pub async fn insert_record(
    pool: &SqlitePool,
    record: &NewPayrollRecord,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO payroll_records
        (employee_id, year, month, basicSalary, allowance, pra, incentive, ot_hours, ot_amount,
         epf_employee_amount, epf_company_amount, etf_amount, gross_amount, deductions, net_amount)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.employee_id)
    .bind(record.year)
    .bind(record.month)
    .bind(record.basic_salary)
    .bind(record.allowance)
    .bind(record.pra)
    .bind(record.incentive)
    .bind(record.ot_hours)
    .bind(record.ot_amount)
    .bind(record.epf_employee_amount)
    .bind(record.epf_company_amount)
    .bind(record.etf_amount)
    .bind(record.gross_amount)
    .bind(record.deductions)
    .bind(record.net_amount)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// A month's records joined with employee identity, ordered by name.
pub async fn records_for_month(
    pool: &SqlitePool,
    year: i64,
    month: i64,
) -> Result<Vec<MonthlyPayrollRow>, sqlx::Error> {
    sqlx::query_as::<_, MonthlyPayrollRow>(
        r#"
        SELECT pr.*, e.name, e.epfNo, e.department
        FROM payroll_records pr
        JOIN employees e ON pr.employee_id = e.id
        WHERE pr.year = ? AND pr.month = ?
        ORDER BY e.name
        "#,
    )
    .bind(year)
    .bind(month)
    .fetch_all(pool)
    .await
}
