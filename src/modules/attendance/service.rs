use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreError, StoreResult};
use chrono::NaiveDate;
use tracing::instrument;

use crate::modules::attendance::{
    AttendanceRecord, AttendanceSaveResult, SAVE_ACTION, SaveAttendanceDto, UpdateAttendanceDto,
};
use crate::validator::{require_id, validate_dto};

pub struct AttendanceService;

impl AttendanceService {
    /// Attendance of one class between two dates, both inclusive
    /// (`GET /api/attendance/<classId>?from=..&to=..`).
    #[instrument(skip(store))]
    pub async fn fetch_attendance<B: ResourceBackend>(
        store: &ResourceStore<B>,
        class_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        require_id("classId", class_id)?;
        if from > to {
            return Err(StoreError::validation(
                "Start date must not be after end date",
            ));
        }

        let params = FetchParams::scoped(class_id).with_range(from, to);
        store
            .fetch_all(&ResourceKey::of::<AttendanceRecord>(), &params)
            .await
    }

    /// Bulk save for one class and day (`POST /api/attendance/save`).
    ///
    /// The cached attendance collection is not touched; re-fetch to see the saved records.
    #[instrument(skip(store, dto), fields(class_id = %dto.class_id, date = %dto.date, entries = dto.records.len()))]
    pub async fn save_attendance<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: SaveAttendanceDto,
    ) -> StoreResult<AttendanceSaveResult> {
        validate_dto(&dto)?;
        store
            .perform(&ResourceKey::of::<AttendanceRecord>(), SAVE_ACTION, &dto)
            .await
    }

    #[instrument(skip(store))]
    pub async fn update_attendance_record<B: ResourceBackend>(
        store: &ResourceStore<B>,
        record_id: &str,
        dto: UpdateAttendanceDto,
    ) -> StoreResult<AttendanceRecord> {
        require_id("recordId", record_id)?;
        validate_dto(&dto)?;
        store
            .update(&ResourceKey::of::<AttendanceRecord>(), record_id, &dto)
            .await
    }
}
