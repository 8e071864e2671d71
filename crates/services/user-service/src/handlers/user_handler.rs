//! User management handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppResult, ValidatedJson};
use domain::{NotificationPreference, Role};

use crate::models::{Invitation, Registration, UserChanges, UserOut};
use crate::notification::NotificationAction;
use crate::state::AppState;

/// Invitation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InviteUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana.popescu@pharmacy.ro")]
    pub email: String,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Ana Popescu")]
    pub name: String,
    #[validate(custom(function = "common::validation::role"))]
    #[schema(example = "EMPLOYEE")]
    pub role: String,
    /// Pharmacy the invited manager or employee is attached to
    pub pharmacy_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InviteUserResponse {
    pub message: String,
}

/// Completion of an invited account.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteRegistrationRequest {
    #[validate(length(min = 1, message = "Invitation token is required"))]
    pub invite_token: String,
    #[validate(custom(function = "common::validation::password"))]
    #[schema(example = "SecurePass123")]
    pub password: String,
    #[validate(custom(function = "common::validation::phone_number"))]
    #[schema(example = "+40712345678")]
    pub phone_number: String,
}

/// Partial user update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "common::validation::phone_number"))]
    #[schema(example = "+40712345678")]
    pub phone_number: Option<String>,
    #[validate(custom(function = "common::validation::role"))]
    #[schema(example = "MANAGER")]
    pub role: Option<String>,
    #[validate(custom(function = "common::validation::notification_preference"))]
    #[schema(example = "SMS")]
    pub notification_preference: Option<String>,
}

impl UpdateUserRequest {
    fn into_changes(self) -> AppResult<UserChanges> {
        Ok(UserChanges {
            phone_number: self.phone_number,
            role: self.role.map(|r| r.parse::<Role>()).transpose()?,
            notification_preference: self
                .notification_preference
                .map(|p| p.parse::<NotificationPreference>())
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RoleFilter {
    /// Only users with this role
    pub role: Option<String>,
}

/// Routes reachable without a token.
pub fn public_user_routes() -> Router<AppState> {
    Router::new().route("/invite/complete", post(complete_registration))
}

/// Administrator routes; the caller guards them.
pub fn admin_user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/invite", post(invite_user))
        .route("/:id", patch(update_user).delete(delete_user))
        .route("/:id/pharmacies", get(get_user_pharmacies))
}

/// Invite a user by e-mail
#[utoipa::path(
    post,
    path = "/api/users/invite",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = InviteUserRequest,
    responses(
        (status = 200, description = "Invitation sent", body = InviteUserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not an administrator"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn invite_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InviteUserRequest>,
) -> AppResult<Json<InviteUserResponse>> {
    let invitation = Invitation {
        email: payload.email,
        name: payload.name,
        role: payload.role.parse()?,
        pharmacy_id: payload.pharmacy_id,
    };

    let email = state.user_service.invite_user(invitation).await?;
    Ok(Json(InviteUserResponse {
        message: format!("Invitation sent to {}", email),
    }))
}

/// Complete an invited account
#[utoipa::path(
    post,
    path = "/api/users/invite/complete",
    tag = "Users",
    request_body = CompleteRegistrationRequest,
    responses(
        (status = 201, description = "Account created", body = UserOut),
        (status = 400, description = "Validation error or invalid invitation"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn complete_registration(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CompleteRegistrationRequest>,
) -> AppResult<(StatusCode, Json<UserOut>)> {
    let user = state
        .user_service
        .save_invited_user(Registration {
            invite_token: payload.invite_token,
            password: payload.password,
            phone_number: payload.phone_number,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserOut::from(user))))
}

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(RoleFilter),
    responses(
        (status = 200, description = "Users", body = Vec<UserOut>),
        (status = 400, description = "Invalid role"),
        (status = 401, description = "Not an administrator")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<RoleFilter>,
) -> AppResult<Json<Vec<UserOut>>> {
    let role = filter.role.map(|r| r.parse::<Role>()).transpose()?;
    let users = state.user_service.list_users(role).await?;
    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

/// Update a user
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserOut),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserOut>> {
    let user = state
        .user_service
        .update_user(id, payload.into_changes()?)
        .await?;
    Ok(Json(UserOut::from(user)))
}

/// Delete a user and notify them
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let user = state.user_service.delete_user(id).await?;

    if let Err(e) = state
        .user_service
        .notify_user(&user, NotificationAction::AccountDeleted)
        .await
    {
        tracing::warn!(user_id = id, "Deletion notice not delivered: {}", e);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Pharmacies of a user
#[utoipa::path(
    get,
    path = "/api/users/{id}/pharmacies",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Pharmacy ids", body = Vec<i32>),
        (status = 401, description = "Not an administrator"),
        (status = 404, description = "User not found"),
        (status = 503, description = "Pharmacy service unavailable")
    )
)]
pub async fn get_user_pharmacies(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<i32>>> {
    Ok(Json(state.user_service.get_user_pharmacies(id).await?))
}
