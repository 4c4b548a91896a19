use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::model::employee::Employee;
use crate::model::payroll::NewPayrollRecord;
use crate::payroll::calculator::{self, ContributionRates, SalaryBase};
use crate::payroll::store;

/// Per-employee result of a batch run.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmployeeOutcome {
    Recorded { employee_id: i64, payroll_id: i64 },
    Failed { employee_id: i64, error: String },
}

#[derive(Debug)]
pub enum BatchReport {
    NoEmployees,
    Completed(Vec<EmployeeOutcome>),
}

/// Runs payroll for every employee for the given month and persists one
/// record each. Employees are processed one after another rather than
/// concurrently, keeping write pressure on the store bounded; a storage
/// failure for one employee lands in that employee's outcome and the rest
/// of the batch still runs. Outcomes come back in employee load order.
pub async fn generate_for_month(
    pool: &SqlitePool,
    year: i64,
    month: i64,
) -> Result<BatchReport, sqlx::Error> {
    let rates = ContributionRates::from(store::latest_settings(pool).await?);
    let employees = store::all_employees(pool).await?;

    if employees.is_empty() {
        return Ok(BatchReport::NoEmployees);
    }

    let mut outcomes = Vec::with_capacity(employees.len());
    for employee in &employees {
        match record_employee_month(pool, employee, year, month, &rates).await {
            Ok(payroll_id) => outcomes.push(EmployeeOutcome::Recorded {
                employee_id: employee.id,
                payroll_id,
            }),
            Err(e) => {
                warn!(error = %e, employee_id = employee.id, "Skipping employee after storage failure");
                outcomes.push(EmployeeOutcome::Failed {
                    employee_id: employee.id,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(year, month, employees = outcomes.len(), "Payroll batch finished");
    Ok(BatchReport::Completed(outcomes))
}

async fn record_employee_month(
    pool: &SqlitePool,
    employee: &Employee,
    year: i64,
    month: i64,
    rates: &ContributionRates,
) -> Result<i64, sqlx::Error> {
    let ot_hours = store::sum_overtime_hours(pool, employee.id, year, month).await?;
    let base = SalaryBase::from(employee);
    let breakdown = calculator::calculate(&base, ot_hours, rates);

    store::insert_record(
        pool,
        &NewPayrollRecord {
            employee_id: employee.id,
            year,
            month,
            basic_salary: base.basic_salary,
            allowance: base.allowance,
            pra: base.pra,
            incentive: base.incentive,
            ot_hours,
            ot_amount: breakdown.ot_amount,
            epf_employee_amount: breakdown.epf_employee_amount,
            epf_company_amount: breakdown.epf_company_amount,
            etf_amount: breakdown.etf_amount,
            gross_amount: breakdown.gross_amount,
            deductions: breakdown.deductions,
            net_amount: breakdown.net_amount,
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::model::payroll::PayrollRecord;
    use crate::payroll::store::{SettingsInput, save_settings};

    async fn seed_employee(pool: &SqlitePool, name: &str, basic_salary: f64) -> i64 {
        let result = sqlx::query(
            "INSERT INTO employees (name, basicSalary, allowance, pra, incentive)
             VALUES (?, ?, 2000, 500, 1000)",
        )
        .bind(name)
        .bind(basic_salary)
        .execute(pool)
        .await
        .unwrap();
        result.last_insert_rowid()
    }

    async fn seed_settings(pool: &SqlitePool) {
        save_settings(
            pool,
            &SettingsInput {
                epf_employee: 8.0,
                epf_company: 12.0,
                etf: 3.0,
                year: 2026,
                month: 1,
                ot_rate: 100.0,
            },
        )
        .await
        .unwrap();
    }

    async fn seed_overtime(pool: &SqlitePool, employee_id: i64, date: &str, hours: f64) {
        sqlx::query("INSERT INTO attendance (employee_id, date, status, ot_hours) VALUES (?, ?, 'present', ?)")
            .bind(employee_id)
            .bind(date)
            .bind(hours)
            .execute(pool)
            .await
            .unwrap();
    }

    async fn stored_records(pool: &SqlitePool) -> Vec<PayrollRecord> {
        sqlx::query_as::<_, PayrollRecord>("SELECT * FROM payroll_records ORDER BY id")
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn empty_employee_set_short_circuits() {
        let pool = test_pool().await;
        seed_settings(&pool).await;

        let report = generate_for_month(&pool, 2026, 1).await.unwrap();
        assert!(matches!(report, BatchReport::NoEmployees));
        assert!(stored_records(&pool).await.is_empty());
    }

    #[actix_web::test]
    async fn records_every_employee_in_load_order() {
        let pool = test_pool().await;
        seed_settings(&pool).await;

        let first = seed_employee(&pool, "Amal", 50000.0).await;
        let second = seed_employee(&pool, "Zara", 60000.0).await;
        seed_overtime(&pool, first, "2026-01-10", 6.0).await;
        seed_overtime(&pool, first, "2026-01-24", 4.0).await;
        // outside the window, must not count
        seed_overtime(&pool, first, "2026-02-02", 8.0).await;

        let report = generate_for_month(&pool, 2026, 1).await.unwrap();
        let BatchReport::Completed(outcomes) = report else {
            panic!("expected a completed batch");
        };

        assert_eq!(
            outcomes,
            vec![
                EmployeeOutcome::Recorded {
                    employee_id: first,
                    payroll_id: 1,
                },
                EmployeeOutcome::Recorded {
                    employee_id: second,
                    payroll_id: 2,
                },
            ]
        );

        let records = stored_records(&pool).await;
        assert_eq!(records.len(), 2);

        let amal = &records[0];
        assert_eq!(amal.ot_hours, 10.0);
        assert_eq!(amal.ot_amount, 1000.0);
        assert_eq!(amal.gross_amount, 54500.0);
        assert_eq!(amal.epf_employee_amount, 4000.0);
        assert_eq!(amal.epf_company_amount, 6000.0);
        assert_eq!(amal.etf_amount, 1500.0);
        assert_eq!(amal.deductions, 4000.0);
        assert_eq!(amal.net_amount, 50500.0);
        assert_eq!((amal.year, amal.month), (2026, 1));
    }

    #[actix_web::test]
    async fn one_failed_insert_does_not_abort_the_batch() {
        let pool = test_pool().await;
        seed_settings(&pool).await;

        let first = seed_employee(&pool, "Amal", 50000.0).await;
        let second = seed_employee(&pool, "Kumar", 45000.0).await;
        let third = seed_employee(&pool, "Zara", 60000.0).await;

        // parameters are not allowed in DDL, so the id is inlined
        sqlx::query(&format!(
            "CREATE TRIGGER reject_second BEFORE INSERT ON payroll_records
             WHEN NEW.employee_id = {second}
             BEGIN SELECT RAISE(ABORT, 'write rejected'); END"
        ))
        .execute(&pool)
        .await
        .unwrap();

        let report = generate_for_month(&pool, 2026, 1).await.unwrap();
        let BatchReport::Completed(outcomes) = report else {
            panic!("expected a completed batch");
        };

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            outcomes[0],
            EmployeeOutcome::Recorded { employee_id, .. } if employee_id == first
        ));
        match &outcomes[1] {
            EmployeeOutcome::Failed { employee_id, error } => {
                assert_eq!(*employee_id, second);
                assert!(error.contains("write rejected"));
            }
            other => panic!("expected a failure outcome, got {other:?}"),
        }
        assert!(matches!(
            outcomes[2],
            EmployeeOutcome::Recorded { employee_id, .. } if employee_id == third
        ));

        let records = stored_records(&pool).await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.employee_id != second));
    }

    #[actix_web::test]
    async fn rerunning_a_month_duplicates_records() {
        let pool = test_pool().await;
        seed_settings(&pool).await;
        let employee = seed_employee(&pool, "Amal", 50000.0).await;

        generate_for_month(&pool, 2026, 1).await.unwrap();
        generate_for_month(&pool, 2026, 1).await.unwrap();

        let records = stored_records(&pool).await;
        assert_eq!(records.len(), 2);
        assert!(
            records
                .iter()
                .all(|r| (r.employee_id, r.year, r.month) == (employee, 2026, 1))
        );
        assert_eq!(records[0].net_amount, records[1].net_amount);
    }

    #[actix_web::test]
    async fn missing_settings_produce_zero_statutory_amounts() {
        let pool = test_pool().await;
        let employee = seed_employee(&pool, "Amal", 50000.0).await;
        seed_overtime(&pool, employee, "2026-01-10", 5.0).await;

        let report = generate_for_month(&pool, 2026, 1).await.unwrap();
        assert!(matches!(report, BatchReport::Completed(_)));

        let records = stored_records(&pool).await;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        // OT hours carry through but price at a zero rate
        assert_eq!(record.ot_hours, 5.0);
        assert_eq!(record.ot_amount, 0.0);
        assert_eq!(record.epf_employee_amount, 0.0);
        assert_eq!(record.epf_company_amount, 0.0);
        assert_eq!(record.etf_amount, 0.0);
        assert_eq!(record.deductions, 0.0);
        assert_eq!(record.gross_amount, 53500.0);
        assert_eq!(record.net_amount, record.gross_amount);
    }
}
