//! Attendance domain models and DTOs.
//!
//! Attendance is read per class and date range, saved in bulk for one class
//! and day through the `save` action, and corrected one record at a time.

use chalkportal_core::serde::deserialize_optional_id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::entity::define_resource;

/// Action name for bulk attendance saves (`POST /api/attendance/save`).
pub const SAVE_ACTION: &str = "save";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        };
        f.write_str(s)
    }
}

/// One student's attendance on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub class_id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

define_resource!(AttendanceRecord, "attendance");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    #[validate(length(min = 1))]
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// Bulk save of a class's attendance for one day.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveAttendanceDto {
    #[validate(length(min = 1))]
    pub class_id: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "At least one attendance entry is required"), nested)]
    pub records: Vec<AttendanceEntry>,
}

/// Correction of a single attendance record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceDto {
    pub status: AttendanceStatus,
    #[validate(length(max = 200, message = "Remarks must be at most 200 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Backend acknowledgement of a bulk save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSaveResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub saved: Option<u64>,
}
