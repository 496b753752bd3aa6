use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreResult};
use tracing::instrument;

use crate::modules::classes::{Class, CreateClassDto};
use crate::validator::validate_dto;

pub struct ClassService;

impl ClassService {
    /// `GET /api/classes`
    #[instrument(skip(store))]
    pub async fn fetch_classes<B: ResourceBackend>(
        store: &ResourceStore<B>,
    ) -> StoreResult<Vec<Class>> {
        store
            .fetch_all(&ResourceKey::of::<Class>(), &FetchParams::default())
            .await
    }

    #[instrument(skip(store))]
    pub async fn create_class<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateClassDto,
    ) -> StoreResult<Class> {
        validate_dto(&dto)?;
        store.create(&ResourceKey::of::<Class>(), &dto).await
    }
}
