use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database")
}

/// Creates the tables on first start. Every statement is IF NOT EXISTS so an
/// existing employee.db is reused untouched.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            epfNo TEXT,
            name TEXT,
            nic TEXT,
            department TEXT,
            position TEXT,
            employee_type TEXT,
            epf_active TEXT,
            address TEXT,
            phone TEXT,
            gender TEXT,
            dob TEXT,
            basicSalary REAL DEFAULT 0,
            allowance REAL DEFAULT 0,
            pra REAL DEFAULT 0,
            incentive REAL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await
    .context("creating employees table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payroll_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            epf_employee REAL DEFAULT 0,
            epf_company REAL DEFAULT 0,
            etf REAL DEFAULT 0,
            year INTEGER,
            month INTEGER,
            ot_rate REAL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("creating payroll_settings table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payroll_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL,
            year INTEGER NOT NULL,
            month INTEGER NOT NULL,
            basicSalary REAL DEFAULT 0,
            allowance REAL DEFAULT 0,
            pra REAL DEFAULT 0,
            incentive REAL DEFAULT 0,
            ot_hours REAL DEFAULT 0,
            ot_amount REAL DEFAULT 0,
            epf_employee_amount REAL DEFAULT 0,
            epf_company_amount REAL DEFAULT 0,
            etf_amount REAL DEFAULT 0,
            gross_amount REAL DEFAULT 0,
            deductions REAL DEFAULT 0,
            net_amount REAL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(employee_id) REFERENCES employees(id)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("creating payroll_records table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER,
            date TEXT,
            status TEXT,
            ot_hours REAL DEFAULT 0,
            note TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(employee_id) REFERENCES employees(id)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("creating attendance table")?;

    Ok(())
}

/// Fresh in-memory database for tests. Capped at one connection: each pooled
/// sqlite connection would otherwise see its own private memory database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
