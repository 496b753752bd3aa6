//! Timetable entries for a class.

use chalkportal_core::serde::deserialize_optional_id;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::define_resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub class_id: String,
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

define_resource!(Schedule, "schedules");

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleDto {
    #[validate(length(min = 1))]
    pub class_id: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 20))]
    pub day: String,
    #[validate(length(min = 1, max = 10))]
    pub start_time: String,
    #[validate(length(min = 1, max = 10))]
    pub end_time: String,
}
