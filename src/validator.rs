//! Client-side DTO validation.
//!
//! Failures become [`StoreError::Validation`] and are returned before any
//! request is issued, so the store's loading and error state never see them.

use chalkportal_core::{StoreError, StoreResult};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match (prefix.is_empty(), field.as_ref()) {
            (_, "__all__") => prefix.to_string(),
            (true, field) => field.to_string(),
            (false, field) => format!("{prefix}.{field}"),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", display_path(&path)))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "value" } else { path }
}

/// Formats validation errors as one comma-separated message, sorted for stable output.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_errors(errors, "", &mut messages);
    messages.sort();
    messages.dedup();
    messages.join(", ")
}

/// Validates a DTO, mapping failures to [`StoreError::Validation`].
pub fn validate_dto<T: Validate>(dto: &T) -> StoreResult<()> {
    dto.validate()
        .map_err(|errors| StoreError::validation(format_errors(&errors)))
}

/// Rejects an empty identifier argument.
pub fn require_id(name: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{name} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkportal_models::{
        AttendanceEntry, AttendanceStatus, CreateClassDto, CreateStudentDto, SaveAttendanceDto,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_custom_message_is_used() {
        let dto = CreateClassDto {
            class_name: String::new(),
            description: None,
        };
        let err = validate_dto(&dto).unwrap_err();
        assert_eq!(err, StoreError::validation("Class name is required"));
    }

    #[test]
    fn test_missing_message_names_field() {
        let dto = CreateStudentDto {
            roll_no: "7".into(),
            name: "Ada".into(),
            email: "not-an-email".into(),
            class_id: "c1".into(),
        };
        let err = validate_dto(&dto).unwrap_err();
        assert_eq!(err.message(), "email is invalid");
    }

    #[test]
    fn test_nested_list_errors_carry_index() {
        let dto = SaveAttendanceDto {
            class_id: "c1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            records: vec![
                AttendanceEntry {
                    student_id: "s1".into(),
                    status: AttendanceStatus::Present,
                },
                AttendanceEntry {
                    student_id: String::new(),
                    status: AttendanceStatus::Absent,
                },
            ],
        };
        let err = validate_dto(&dto).unwrap_err();
        assert_eq!(err.message(), "records[1].student_id is invalid");
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("classId", "c1").is_ok());
        assert_eq!(
            require_id("classId", "  ").unwrap_err().message(),
            "classId is required"
        );
    }
}
