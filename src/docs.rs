use crate::api::attendance::CreateAttendance;
use crate::api::payroll::{CalculateRequest, GenerateRequest, SettingsPayload};
use crate::model::attendance::{AttendanceEntry, AttendanceSummary};
use crate::model::employee::Employee;
use crate::model::payroll::{MonthlyPayrollRow, PayrollRecord, PayrollSettings};
use crate::payroll::calculator::PayrollBreakdown;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Backend API",
        version = "1.0.0",
        description = r#"
## Payroll record-keeper

Stores employee master data and monthly attendance, and turns them into
auditable monthly payroll records.

### Key Features
- **Employee Management**
  - Create, update, list, and view employee profiles
- **Attendance**
  - Daily entries with overtime hours, monthly list and summary
- **Payroll Settings**
  - One active set of EPF/ETF percentages and the overtime rate
- **Payroll**
  - Single-employee preview, record save, monthly listing, and
    whole-company batch generation

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::attendance_summary,
        crate::api::attendance::delete_attendance,

        crate::api::payroll::save_settings,
        crate::api::payroll::latest_settings,
        crate::api::payroll::calculate_payroll,
        crate::api::payroll::save_record,
        crate::api::payroll::list_records,
        crate::api::payroll::generate_payroll
    ),
    components(
        schemas(
            Employee,
            AttendanceEntry,
            AttendanceSummary,
            CreateAttendance,
            PayrollSettings,
            SettingsPayload,
            CalculateRequest,
            GenerateRequest,
            PayrollBreakdown,
            PayrollRecord,
            MonthlyPayrollRow
        )
    ),
    tags(
        (name = "Employee", description = "Employee master data APIs"),
        (name = "Attendance", description = "Attendance entry APIs"),
        (name = "Payroll Settings", description = "Contribution percentage and OT rate APIs"),
        (name = "Payroll", description = "Payroll computation and record APIs"),
    )
)]
pub struct ApiDoc;
