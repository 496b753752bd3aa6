//! Syllabus entries, scoped to a class.

use chalkportal_core::serde::deserialize_optional_id;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::define_resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllabus {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub class_id: String,
    pub subject: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to an uploaded document. Uploading is handled elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

define_resource!(Syllabus, "syllabus");

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSyllabusDto {
    #[validate(length(min = 1))]
    pub class_id: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}
