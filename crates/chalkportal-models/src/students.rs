//! Student domain models and DTOs.
//!
//! Students are always read scoped to a class (`GET /api/students/<classId>`).

use chalkportal_core::serde::deserialize_optional_id;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::define_resource;

/// A student enrolled in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub roll_no: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
}

define_resource!(Student, "students");

/// DTO for adding a student to a class.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 20))]
    pub roll_no: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub class_id: String,
}
