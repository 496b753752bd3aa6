use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreResult};
use tracing::instrument;

use crate::modules::syllabus::{CreateSyllabusDto, Syllabus};
use crate::validator::{require_id, validate_dto};

pub struct SyllabusService;

impl SyllabusService {
    /// `GET /api/syllabus/<classId>`
    #[instrument(skip(store))]
    pub async fn fetch_syllabi<B: ResourceBackend>(
        store: &ResourceStore<B>,
        class_id: &str,
    ) -> StoreResult<Vec<Syllabus>> {
        require_id("classId", class_id)?;
        store
            .fetch_all(&ResourceKey::of::<Syllabus>(), &FetchParams::scoped(class_id))
            .await
    }

    /// Creates a syllabus entry. `fileUrl` must already point at an uploaded document.
    #[instrument(skip(store))]
    pub async fn create_syllabus<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateSyllabusDto,
    ) -> StoreResult<Syllabus> {
        validate_dto(&dto)?;
        store.create(&ResourceKey::of::<Syllabus>(), &dto).await
    }
}
