use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AdminClaims, AppError, AuthClaims, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Role, UpdateUser, UserFilter, UserListResponse, UserPublic, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        me,
        update_me,
        get_user_public,
        admin_update_user,
        admin_delete_user,
    ),
    components(
        schemas(UserResponse, UserPublic, UpdateUser, UserListResponse, Role),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User profile and administration endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users))
        .route("/me", get(me).put(update_me))
        .route(
            "/{id}",
            get(get_user_public)
                .put(admin_update_user)
                .delete(admin_delete_user),
        )
        .with_state(shared_service)
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(UserFilter),
    responses(
        (status = 200, description = "Paginated list of users", body = UserListResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AdminClaims(_claims): AdminClaims,
    Query(filter): Query<UserFilter>,
) -> Result<Json<UserListResponse>, AppError> {
    let page = service.list_users(filter).await?;
    Ok(Json(page))
}

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = claims.user_id()?;
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}

/// Update the caller's own profile
///
/// A `role` field in the body is rejected with 403.
#[utoipa::path(
    put,
    path = "/me",
    tag = "Users",
    request_body = UpdateUser,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AuthClaims(claims): AuthClaims,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = claims.user_id()?;
    let user = service.update_profile(user_id, input).await?;
    Ok(Json(user))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Public profile", body = UserPublic),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_public<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<Json<UserPublic>, AppError> {
    let user = service.get_public_profile(id).await?;
    Ok(Json(user))
}

/// Update any user, including their role (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AdminClaims(_claims): AdminClaims,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = service.admin_update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user (admin only)
///
/// Admins cannot delete their own account.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AdminClaims(claims): AdminClaims,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    let acting_user_id = claims.user_id()?;
    service.delete_user(id, acting_user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
