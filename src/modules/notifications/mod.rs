pub mod service;

pub use chalkportal_models::notifications::{Audience, CreateNotificationDto, Notification};
pub use service::NotificationService;
