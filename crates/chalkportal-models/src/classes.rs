//! Class domain models and DTOs.

use chalkportal_core::serde::deserialize_optional_id;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::define_resource;

/// A class (course section) taught in the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

define_resource!(Class, "classes");

/// DTO for creating a new class.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100, message = "Class name is required"))]
    pub class_name: String,
    #[validate(length(max = 500))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Resource};

    #[test]
    fn test_class_from_backend_json() {
        let json = r#"{"_id":"c1","className":"Math","description":"Algebra I"}"#;
        let class: Class = serde_json::from_str(json).unwrap();
        assert_eq!(class.id().as_deref(), Some("c1"));
        assert_eq!(class.class_name, "Math");
        assert_eq!(Class::KEY, "classes");
    }

    #[test]
    fn test_create_class_dto_validation() {
        let dto = CreateClassDto {
            class_name: "Math".to_string(),
            description: None,
        };
        assert!(dto.validate().is_ok());

        let empty = CreateClassDto {
            class_name: String::new(),
            description: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_create_class_dto_serializes_camel_case() {
        let dto = CreateClassDto {
            class_name: "Math".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json, serde_json::json!({"className": "Math"}));
    }
}
