//! Tests (assessments) created by teachers and taken by students.
//!
//! The backend collection is named `tests`; the Rust type is `Assessment` to
//! keep it apart from the `tests` modules used for unit tests.

use chalkportal_core::serde::deserialize_optional_id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entity::define_resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_answer_in_options"))]
pub struct Question {
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
}

fn validate_answer_in_options(question: &Question) -> Result<(), ValidationError> {
    match &question.answer {
        Some(answer) if !question.options.is_empty() && !question.options.contains(answer) => {
            Err(ValidationError::new("answer_not_in_options"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

define_resource!(Assessment, "tests");

impl Assessment {
    /// Sum of question marks, falling back to `max_score` when questions carry none.
    pub fn total_marks(&self) -> Option<f64> {
        let marks: Vec<f64> = self.questions.iter().filter_map(|q| q.marks).collect();
        if marks.is_empty() {
            self.max_score
        } else {
            Some(marks.iter().sum())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[validate(length(min = 1, message = "A test needs at least one question"), nested)]
    pub questions: Vec<Question>,
}
