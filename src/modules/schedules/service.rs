use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreError, StoreResult};
use tracing::instrument;

use crate::modules::schedules::{CreateScheduleDto, Schedule};
use crate::validator::{require_id, validate_dto};

pub struct ScheduleService;

impl ScheduleService {
    /// Timetable of one class (`GET /api/schedules/<classId>`).
    #[instrument(skip(store))]
    pub async fn fetch_schedules<B: ResourceBackend>(
        store: &ResourceStore<B>,
        class_id: &str,
    ) -> StoreResult<Vec<Schedule>> {
        require_id("classId", class_id)?;
        store
            .fetch_all(&ResourceKey::of::<Schedule>(), &FetchParams::scoped(class_id))
            .await
    }

    /// Times are compared as `HH:MM` strings.
    #[instrument(skip(store))]
    pub async fn create_schedule<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateScheduleDto,
    ) -> StoreResult<Schedule> {
        validate_dto(&dto)?;
        if dto.start_time >= dto.end_time {
            return Err(StoreError::validation("Start time must be before end time"));
        }
        store.create(&ResourceKey::of::<Schedule>(), &dto).await
    }
}
