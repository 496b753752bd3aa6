use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreResult};
use tracing::instrument;

use crate::modules::submissions::{CreateSubmissionDto, GradeSubmissionDto, Submission};
use crate::validator::{require_id, validate_dto};

pub struct SubmissionService;

impl SubmissionService {
    /// Submissions for one test (`GET /api/submissions/<testId>`).
    #[instrument(skip(store))]
    pub async fn fetch_submissions<B: ResourceBackend>(
        store: &ResourceStore<B>,
        test_id: &str,
    ) -> StoreResult<Vec<Submission>> {
        require_id("testId", test_id)?;
        store
            .fetch_all(&ResourceKey::of::<Submission>(), &FetchParams::scoped(test_id))
            .await
    }

    #[instrument(skip(store, dto), fields(test_id = %dto.test_id, student_id = %dto.student_id))]
    pub async fn create_submission<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateSubmissionDto,
    ) -> StoreResult<Submission> {
        validate_dto(&dto)?;
        store.create(&ResourceKey::of::<Submission>(), &dto).await
    }

    /// Records a score and optional feedback (`PUT /api/submissions/<id>`).
    #[instrument(skip(store))]
    pub async fn grade_submission<B: ResourceBackend>(
        store: &ResourceStore<B>,
        submission_id: &str,
        dto: GradeSubmissionDto,
    ) -> StoreResult<Submission> {
        require_id("submissionId", submission_id)?;
        validate_dto(&dto)?;
        store
            .update(&ResourceKey::of::<Submission>(), submission_id, &dto)
            .await
    }
}
