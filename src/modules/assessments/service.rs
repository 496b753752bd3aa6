use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreError, StoreResult};
use tracing::instrument;

use crate::modules::assessments::{Assessment, CreateAssessmentDto};
use crate::validator::{require_id, validate_dto};

pub struct AssessmentService;

impl AssessmentService {
    #[instrument(skip(store))]
    pub async fn fetch_tests<B: ResourceBackend>(
        store: &ResourceStore<B>,
    ) -> StoreResult<Vec<Assessment>> {
        store
            .fetch_all(&ResourceKey::of::<Assessment>(), &FetchParams::default())
            .await
    }

    #[instrument(skip(store, dto), fields(title = %dto.title, questions = dto.questions.len()))]
    pub async fn create_test<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateAssessmentDto,
    ) -> StoreResult<Assessment> {
        validate_dto(&dto)?;

        let total: f64 = dto.questions.iter().filter_map(|q| q.marks).sum();
        if let Some(max_score) = dto.max_score
            && total > max_score
        {
            return Err(StoreError::validation(format!(
                "Question marks ({total}) exceed the maximum score ({max_score})"
            )));
        }

        store.create(&ResourceKey::of::<Assessment>(), &dto).await
    }

    #[instrument(skip(store))]
    pub async fn delete_test<B: ResourceBackend>(
        store: &ResourceStore<B>,
        test_id: &str,
    ) -> StoreResult<()> {
        require_id("testId", test_id)?;
        store
            .delete::<Assessment>(&ResourceKey::of::<Assessment>(), test_id)
            .await
    }
}
