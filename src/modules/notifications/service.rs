use chalkportal_cache::{ResourceBackend, ResourceKey, ResourceStore};
use chalkportal_core::{FetchParams, StoreResult};
use tracing::instrument;

use crate::modules::notifications::{CreateNotificationDto, Notification};
use crate::validator::{require_id, validate_dto};

pub struct NotificationService;

impl NotificationService {
    #[instrument(skip(store))]
    pub async fn fetch_notifications<B: ResourceBackend>(
        store: &ResourceStore<B>,
    ) -> StoreResult<Vec<Notification>> {
        store
            .fetch_all(&ResourceKey::of::<Notification>(), &FetchParams::default())
            .await
    }

    #[instrument(skip(store))]
    pub async fn create_notification<B: ResourceBackend>(
        store: &ResourceStore<B>,
        dto: CreateNotificationDto,
    ) -> StoreResult<Notification> {
        validate_dto(&dto)?;
        store.create(&ResourceKey::of::<Notification>(), &dto).await
    }

    #[instrument(skip(store))]
    pub async fn delete_notification<B: ResourceBackend>(
        store: &ResourceStore<B>,
        notification_id: &str,
    ) -> StoreResult<()> {
        require_id("notificationId", notification_id)?;
        store
            .delete::<Notification>(&ResourceKey::of::<Notification>(), notification_id)
            .await
    }
}
