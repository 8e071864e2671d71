//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{NotificationPreference, Role};
use jwt_guard::{TokenIn, TokenOut, VerifyOut};

use crate::handlers::user_handler::{
    CompleteRegistrationRequest, InviteUserRequest, InviteUserResponse, UpdateUserRequest,
};
use crate::models::UserOut;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        jwt_guard::routes::obtain_token,
        jwt_guard::routes::verify_token,
        crate::handlers::user_handler::invite_user,
        crate::handlers::user_handler::complete_registration,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::get_user_pharmacies,
    ),
    components(
        schemas(
            TokenIn,
            TokenOut,
            VerifyOut,
            Role,
            NotificationPreference,
            UserOut,
            InviteUserRequest,
            InviteUserResponse,
            CompleteRegistrationRequest,
            UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token endpoints"),
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
