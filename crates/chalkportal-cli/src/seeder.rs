//! Classroom seeding.
//!
//! Generates fake classes with enrolled students and writes them through the
//! store, so the same seeding works against the REST API and local files.

use chalkportal::modules::{ClassService, StudentService};
use chalkportal_cache::{ResourceBackend, ResourceStore};
use chalkportal_core::{StoreError, StoreResult};
use chalkportal_models::{CreateClassDto, CreateStudentDto};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use std::time::Instant;
use tracing::info;

const SUBJECTS: [&str; 6] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Literature",
];

/// Seed data for creating a class.
pub struct ClassSeed {
    pub class_name: String,
    pub description: String,
}

/// Configuration for classroom seeding.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub classes: usize,
    pub students_per_class: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            classes: 3,
            students_per_class: 20,
        }
    }
}

impl SeedConfig {
    pub fn new(classes: usize) -> Self {
        Self {
            classes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_students(mut self, students_per_class: usize) -> Self {
        self.students_per_class = students_per_class;
        self
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub classes: usize,
    pub students: usize,
}

pub fn generate_classes(count: usize) -> Vec<ClassSeed> {
    (0..count)
        .map(|i| {
            let subject = SUBJECTS[i % SUBJECTS.len()];
            let section: String = Word().fake();
            ClassSeed {
                class_name: format!("{subject} {}", i + 1),
                description: format!("{subject}, section {section}"),
            }
        })
        .collect()
}

pub fn generate_students(class_id: &str, count: usize) -> Vec<CreateStudentDto> {
    (0..count)
        .map(|i| CreateStudentDto {
            roll_no: format!("{}", i + 1),
            name: Name().fake(),
            email: SafeEmail().fake(),
            class_id: class_id.to_string(),
        })
        .collect()
}

/// Creates classes and their students through the store.
pub async fn seed_classrooms<B: ResourceBackend>(
    store: &ResourceStore<B>,
    config: SeedConfig,
) -> StoreResult<SeedSummary> {
    let start_time = Instant::now();
    println!("📚 Seeding {} classes...", config.classes);

    let mut summary = SeedSummary::default();

    for seed in generate_classes(config.classes) {
        let class = ClassService::create_class(
            store,
            CreateClassDto {
                class_name: seed.class_name,
                description: Some(seed.description),
            },
        )
        .await?;
        summary.classes += 1;

        let class_id = class
            .id
            .ok_or_else(|| StoreError::transport("Backend returned a class without an id"))?;

        for student in generate_students(&class_id, config.students_per_class) {
            StudentService::create_student(store, student).await?;
            summary.students += 1;
        }
    }

    println!(
        "   ✓ Created {} classes and {} students in {:?}",
        summary.classes,
        summary.students,
        start_time.elapsed()
    );
    info!(classes = summary.classes, students = summary.students, "Seeding complete");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkportal::state::PortalState;
    use chalkportal_auth::SessionContext;
    use chalkportal_config::StorageConfig;

    #[test]
    fn test_generate_classes_cycles_subjects() {
        let classes = generate_classes(7);
        assert_eq!(classes.len(), 7);
        assert_eq!(classes[0].class_name, "Mathematics 1");
        assert_eq!(classes[6].class_name, "Mathematics 7");
    }

    #[test]
    fn test_generate_students() {
        let students = generate_students("c1", 3);
        assert_eq!(students.len(), 3);
        assert!(students.iter().all(|s| s.class_id == "c1"));
        assert_eq!(students[2].roll_no, "3");
        assert!(students.iter().all(|s| s.email.contains('@')));
    }

    #[tokio::test]
    async fn test_seed_into_local_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StorageConfig::new(dir.path()).with_parent_field("students", "classId");
        let state = PortalState::local(config, SessionContext::new());

        let summary = seed_classrooms(&state.store, SeedConfig::new(2).with_students(4))
            .await
            .unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                classes: 2,
                students: 8
            }
        );

        let classes = ClassService::fetch_classes(&state.store).await.unwrap();
        assert_eq!(classes.len(), 2);

        let class_id = classes[0].id.clone().unwrap();
        let students = StudentService::fetch_students(&state.store, &class_id)
            .await
            .unwrap();
        assert_eq!(students.len(), 4);
    }
}
