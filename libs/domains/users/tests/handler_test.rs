//! Handler tests for Users domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Authentication and role gates
//!
//! Unlike E2E tests, these test ONLY the users domain handlers mounted the
//! way the application mounts them, not the full application.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_jwt_auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("handler-test-secret-that-is-32-chars!"))
}

/// Mount the auth and users routers the way the application does
fn test_app(service: UserService<MongoUserRepository>, jwt_auth: &JwtAuth) -> Router {
    Router::new()
        .nest(
            "/auth",
            auth_router(AuthState::new(service.clone(), jwt_auth.clone())),
        )
        .nest("/users", handlers::router(service))
        .layer(Extension(jwt_auth.clone()))
}

fn token_for(jwt_auth: &JwtAuth, user: &UserResponse) -> String {
    jwt_auth
        .create_access_token(
            &user.id.to_string(),
            &user.username,
            &user.email,
            &user.role.to_string(),
        )
        .unwrap()
}

fn admin_token(jwt_auth: &JwtAuth) -> String {
    jwt_auth
        .create_access_token(&Uuid::new_v4().to_string(), "root", "root@example.com", "admin")
        .unwrap()
}

fn register_input(builder: &TestDataBuilder, suffix: &str) -> RegisterRequest {
    RegisterRequest {
        username: builder.name("user", suffix),
        email: builder.email(suffix),
        password: "Password1".to_string(),
        full_name: None,
        bio: None,
        phone: None,
    }
}

#[tokio::test]
async fn test_register_handler_returns_201() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("register_201")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    let builder = TestDataBuilder::from_test_name("handler_register_201");

    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.name("user", "main"),
                "email": format!("MiXeD-{}", builder.email("main")),
                "password": "Password1",
                "full_name": "Handler Test"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.username, builder.name("user", "main"));
    assert_eq!(user.role, Role::User);
    // Emails are normalized to lowercase on registration
    assert_eq!(user.email, format!("mixed-{}", builder.email("main")));
}

#[tokio::test]
async fn test_register_handler_validates_input() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("register_invalid")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    // Username too short
    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": "ab",
                "email": "short@example.com",
                "password": "Password1"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_handler_rejects_weak_password() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("register_weak")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    let builder = TestDataBuilder::from_test_name("handler_register_weak");

    // No uppercase letter
    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.name("user", "weak"),
                "email": builder.email("weak"),
                "password": "alllowercase1"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();
    assert!(body_str.contains("uppercase"));
}

#[tokio::test]
async fn test_register_handler_rejects_duplicate_email() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("register_dup")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_register_dup");
    service
        .register(register_input(&builder, "taken"))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    // Same email, different username
    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": builder.name("user", "other"),
                "email": builder.email("taken"),
                "password": "Password1"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();
    assert!(body_str.contains("Email already registered"));
}

#[tokio::test]
async fn test_login_handler_returns_token() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("login_ok")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_login_ok");
    service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    // Login by username
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username_or_email": builder.name("user", "main"),
                "password": "Password1"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let token: TokenResponse = json_body(response.into_body()).await;
    assert_eq!(token.token_type, "bearer");
    assert!(!token.access_token.is_empty());

    // Login by email works too
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username_or_email": builder.email("main"),
                "password": "Password1"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_handler_rejects_wrong_password() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("login_wrong")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_login_wrong");
    service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username_or_email": builder.name("user", "main"),
                "password": "WrongPassword1"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_handler_requires_token() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("me_no_token")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("GET")
        .uri("/users/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_handler_returns_profile() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("me_ok")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_me_ok");
    let user = service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();
    let token = token_for(&jwt_auth, &user);

    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("GET")
        .uri("/users/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let profile: UserResponse = json_body(response.into_body()).await;
    assert_eq!(profile.id, user.id);
    assert_eq!(profile.username, user.username);
}

#[tokio::test]
async fn test_update_me_rejects_role_change() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("me_role")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_me_role");
    let user = service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();
    let token = token_for(&jwt_auth, &user);

    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("PUT")
        .uri("/users/me")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({ "role": "admin" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_user_public_hides_private_fields() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("public_profile")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_public_profile");
    let user = service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    // No token needed for public profiles
    let request = Request::builder()
        .method("GET")
        .uri(format!("/users/{}", user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let profile: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(profile["username"], user.username.as_str());
    assert!(profile.get("email").is_none(), "email must not be public");
    assert!(
        profile.get("phone").is_none(),
        "phone must not be public"
    );
}

#[tokio::test]
async fn test_get_user_handler_rejects_malformed_uuid() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("bad_uuid")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("GET")
        .uri("/users/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("list_gate")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_list_gate");
    let user = service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();
    let user_token = token_for(&jwt_auth, &user);

    let app = test_app(service, &jwt_auth);

    // Regular user is rejected
    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header("authorization", format!("Bearer {}", user_token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin gets the paginated list
    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header("authorization", format!("Bearer {}", admin_token(&jwt_auth)))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: UserListResponse = json_body(response.into_body()).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.limit, 10);
}

#[tokio::test]
async fn test_admin_delete_user_returns_204() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("admin_delete")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_admin_delete");
    let user = service
        .register(register_input(&builder, "victim"))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);
    let token = admin_token(&jwt_auth);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/users/{}", user.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleted user is gone
    let request = Request::builder()
        .method("GET")
        .uri(format!("/users/{}", user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again reports 404
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/users/{}", user.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refresh_token_handler() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("refresh")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_refresh");
    let user = service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();
    let token = token_for(&jwt_auth, &user);

    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/refresh-token")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let refreshed: TokenResponse = json_body(response.into_body()).await;
    assert_eq!(refreshed.token_type, "bearer");

    // Without a token the refresh is rejected
    let request = Request::builder()
        .method("POST")
        .uri("/auth/refresh-token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_handler() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("change_pw")));
    let jwt_auth = test_jwt_auth();

    let builder = TestDataBuilder::from_test_name("handler_change_pw");
    let user = service
        .register(register_input(&builder, "main"))
        .await
        .unwrap();
    let token = token_for(&jwt_auth, &user);

    let app = test_app(service.clone(), &jwt_auth);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/change-password")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "current_password": "Password1",
                "new_password": "Password2"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let confirmation: MessageResponse = json_body(response.into_body()).await;
    assert_eq!(confirmation.message, "Password updated successfully");

    // Old password no longer works, new one does
    let old = service
        .verify_credentials(&user.username, "Password1")
        .await;
    assert!(matches!(old, Err(UserError::InvalidCredentials)));

    service
        .verify_credentials(&user.username, "Password2")
        .await
        .unwrap();
}
