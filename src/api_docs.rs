use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;

use crate::core::notifier::sweep::SweepReport;
use crate::enums::{EventCategory, NotificationType};
use crate::routes::cron::dto::CronResponseDto;
use crate::routes::dashboard::dto::DashboardDto;
use crate::routes::dog::dto::{CreateDogRequestDto, DogDto, UpdateDogRequestDto};
use crate::routes::event::dto::{
    CreateEventRequestDto, EventDto, UpdateEventRequestDto, UserEventDto,
};
use crate::routes::notification::dto::{
    CreateNotificationRequestDto, MarkNotificationAsReadResponseDto, NotificationDto,
};

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityModifier),
    servers(
        (url = "/"),
    ),
    components(
        schemas(
            // Event DTOs
            EventCategory,
            CreateEventRequestDto,
            UpdateEventRequestDto,
            EventDto,
            UserEventDto,

            // Dog DTOs
            CreateDogRequestDto,
            UpdateDogRequestDto,
            DogDto,

            // Dashboard
            DashboardDto,

            // Notification DTOs
            NotificationType,
            NotificationDto,
            CreateNotificationRequestDto,
            MarkNotificationAsReadResponseDto,

            // Cron
            SweepReport,
            CronResponseDto,
        )
    ),
    tags(
        (name = "Event APIs", description = "Dog event logging endpoints"),
        (name = "Dog APIs", description = "Dog profile endpoints"),
        (name = "Dashboard APIs", description = "Per-dog overview"),
        (name = "Notification APIs", description = "Notification management endpoints"),
        (name = "Cron APIs", description = "Scheduler triggered jobs"),
        (name = "Health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityModifier;
impl Modify for SecurityModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
