use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::model::payroll::PayrollSettings;

/// Base pay figures an employee brings into a payroll run.
#[derive(Debug, Clone, Copy)]
pub struct SalaryBase {
    pub basic_salary: f64,
    pub allowance: f64,
    pub pra: f64,
    pub incentive: f64,
}

impl From<&Employee> for SalaryBase {
    fn from(employee: &Employee) -> Self {
        Self {
            basic_salary: employee.basic_salary,
            allowance: employee.allowance,
            pra: employee.pra,
            incentive: employee.incentive,
        }
    }
}

/// Active contribution percentages and overtime rate. No settings row means
/// every rate is 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContributionRates {
    pub epf_employee_pct: f64,
    pub epf_company_pct: f64,
    pub etf_pct: f64,
    pub ot_rate: f64,
}

impl From<Option<PayrollSettings>> for ContributionRates {
    fn from(settings: Option<PayrollSettings>) -> Self {
        match settings {
            Some(s) => Self {
                epf_employee_pct: s.epf_employee,
                epf_company_pct: s.epf_company,
                etf_pct: s.etf,
                ot_rate: s.ot_rate,
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollBreakdown {
    #[schema(example = 1000.0)]
    pub ot_amount: f64,
    #[schema(example = 54500.0)]
    pub gross_amount: f64,
    #[schema(example = 4000.0)]
    pub epf_employee_amount: f64,
    #[schema(example = 6000.0)]
    pub epf_company_amount: f64,
    #[schema(example = 1500.0)]
    pub etf_amount: f64,
    #[schema(example = 4000.0)]
    pub deductions: f64,
    #[schema(example = 50500.0)]
    pub net_amount: f64,
}

/// Round to cents, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the full breakdown for one employee-month. Each derived amount
/// is rounded on its own before it feeds the next line, so totals carry the
/// rounded figures rather than the raw products.
pub fn calculate(base: &SalaryBase, ot_hours: f64, rates: &ContributionRates) -> PayrollBreakdown {
    let ot_amount = round2(ot_hours * rates.ot_rate);
    let gross_amount = round2(
        base.basic_salary + base.allowance + base.pra + base.incentive + ot_amount,
    );

    let epf_employee_amount = round2(base.basic_salary * rates.epf_employee_pct / 100.0);
    let epf_company_amount = round2(base.basic_salary * rates.epf_company_pct / 100.0);
    let etf_amount = round2(base.basic_salary * rates.etf_pct / 100.0);

    // Only the employee share of EPF comes out of the pay packet; the
    // company EPF and ETF amounts are informational.
    let deductions = epf_employee_amount;
    let net_amount = round2(gross_amount - deductions);

    PayrollBreakdown {
        ot_amount,
        gross_amount,
        epf_employee_amount,
        epf_company_amount,
        etf_amount,
        deductions,
        net_amount,
    }
}
