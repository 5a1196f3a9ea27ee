//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! marketplace types they exchange and the session cookie security scheme.
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AdminStats, AvailabilitySlot, Error, ErrorCode, Feedback, ProfileDetails, Rating, Role,
    SwapRequest, SwapStatus, UserProfile,
};
use crate::inbound::http::accounts::{LoginBody, SignupBody};
use crate::inbound::http::requests::{CreateRequestBody, FeedbackBody, TransitionBody};
use crate::inbound::http::users::{ProfileUpdateBody, UserPage};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SkillSwap marketplace API",
        description = "Profiles, skill swap requests, feedback and administrator statistics.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_user_feedback,
        crate::inbound::http::requests::list_requests,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::transition_request,
        crate::inbound::http::requests::submit_feedback,
        crate::inbound::http::admin::admin_stats,
        crate::inbound::http::admin::admin_list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserProfile,
        ProfileDetails,
        Rating,
        Role,
        AvailabilitySlot,
        SwapRequest,
        SwapStatus,
        Feedback,
        AdminStats,
        Error,
        ErrorCode,
        SignupBody,
        LoginBody,
        ProfileUpdateBody,
        UserPage,
        CreateRequestBody,
        TransitionBody,
        FeedbackBody,
    )),
    tags(
        (name = "accounts", description = "Signup and login"),
        (name = "users", description = "Directory browsing and profile editing"),
        (name = "requests", description = "Skill swap requests and feedback"),
        (name = "admin", description = "Administrator overview"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
