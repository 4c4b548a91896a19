use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::EnumString;
use utoipa::ToSchema;

/// One attendance entry; dates are stored as ISO text so month windows can
/// be matched by plain string comparison.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2026-01-15", format = "date")]
    pub date: String,

    #[schema(example = "present")]
    pub status: String,

    #[schema(example = 2.5)]
    pub ot_hours: Option<f64>,

    pub note: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,
}

/// Statuses the summary recognizes; parsing is case-insensitive. Unknown
/// statuses still store and list, they just only count toward days_count.
#[derive(Debug, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 20)]
    pub present: u32,
    #[schema(example = 2)]
    pub absent: u32,
    #[schema(example = 1)]
    pub leave: u32,
    #[schema(example = 12.5)]
    pub ot_hours: f64,
    #[schema(example = 23)]
    pub days_count: usize,
}

impl AttendanceSummary {
    pub fn from_entries(entries: &[AttendanceEntry]) -> Self {
        let mut summary = AttendanceSummary {
            days_count: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            match AttendanceStatus::from_str(&entry.status) {
                Ok(AttendanceStatus::Present) => summary.present += 1,
                Ok(AttendanceStatus::Absent) => summary.absent += 1,
                Ok(AttendanceStatus::Leave) => summary.leave += 1,
                Err(_) => {}
            }
            summary.ot_hours += entry.ot_hours.unwrap_or(0.0);
        }

        summary
    }
}
