//! Authentication endpoints: register, login, token refresh, password change.
//!
//! Tokens are stateless HS256 JWTs issued by [`JwtAuth`]; there is no
//! server-side token store, so a token stays valid until it expires.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
    AppError, AuthClaims, JwtAuth, ValidatedJson,
};
use utoipa::OpenApi;

use crate::error::UserError;
use crate::models::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, TokenResponse,
    UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> AuthState<R> {
    pub fn new(service: UserService<R>, jwt_auth: JwtAuth) -> Self {
        Self { service, jwt_auth }
    }
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

/// OpenAPI documentation for Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, refresh_token, change_password),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            ChangePasswordRequest,
            MessageResponse,
            UserResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and token endpoints")
    )
)]
pub struct ApiDoc;

/// Create the auth router
pub fn auth_router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/change-password", post(change_password))
        .with_state(state)
}

fn issue_token(jwt_auth: &JwtAuth, user: &UserResponse) -> Result<TokenResponse, AppError> {
    let token = jwt_auth
        .create_access_token(
            &user.id.to_string(),
            &user.username,
            &user.email,
            &user.role.to_string(),
        )
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            AppError::InternalServerError("Failed to create token".to_string())
        })?;

    Ok(TokenResponse::bearer(token))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.service.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with username or email plus password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state
        .service
        .verify_credentials(&input.username_or_email, &input.password)
        .await?;

    let token = issue_token(&state.jwt_auth, &user)?;
    Ok(Json(token))
}

/// Issue a fresh token for the current user
#[utoipa::path(
    post,
    path = "/refresh-token",
    tag = "Auth",
    responses(
        (status = 200, description = "Fresh bearer token", body = TokenResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh_token<R: UserRepository>(
    State(state): State<AuthState<R>>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<TokenResponse>, AppError> {
    let user_id = claims.user_id()?;

    // The account may have been deleted (or its role changed) since the
    // current token was issued, so read it back before signing a new one.
    let user = match state.service.get_user(user_id).await {
        Ok(user) => user,
        Err(UserError::NotFound(_)) => {
            return Err(AppError::Unauthorized(
                "Could not validate credentials".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(&state.jwt_auth, &user)?;
    Ok(Json(token))
}

/// Change the current user's password
#[utoipa::path(
    post,
    path = "/change-password",
    tag = "Auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn change_password<R: UserRepository>(
    State(state): State<AuthState<R>>,
    AuthClaims(claims): AuthClaims,
    ValidatedJson(input): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = claims.user_id()?;

    state
        .service
        .change_password(user_id, &input.current_password, &input.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

