use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreResult};
use tracing::instrument;

use crate::modules::students::{CreateStudentDto, Student};
use crate::validator::{require_id, validate_dto};

pub struct StudentService;

impl StudentService {
    /// Students enrolled in one class (`GET /api/students/<classId>`).
    #[instrument(skip(store))]
    pub async fn fetch_students<B: ResourceBackend>(
        store: &ResourceStore<B>,
        class_id: &str,
    ) -> StoreResult<Vec<Student>> {
        require_id("classId", class_id)?;
        store
            .fetch_all(&ResourceKey::of::<Student>(), &FetchParams::scoped(class_id))
            .await
    }

    #[instrument(skip(store))]
    pub async fn create_student<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateStudentDto,
    ) -> StoreResult<Student> {
        validate_dto(&dto)?;
        store.create(&ResourceKey::of::<Student>(), &dto).await
    }
}
