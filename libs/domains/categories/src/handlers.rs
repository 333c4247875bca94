//! HTTP handlers for the Categories API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AdminClaims, AppError, UuidPath, ValidatedJson,
};

use crate::models::{
    CategoryFilter, CategoryListResponse, CategoryResponse, CreateCategory, UpdateCategory,
};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

/// OpenAPI documentation for Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_category,
        list_categories,
        get_category,
        update_category,
        delete_category
    ),
    components(
        schemas(
            CategoryResponse,
            CreateCategory,
            UpdateCategory,
            CategoryListResponse
        ),
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
        (name = "Categories", description = "Event category management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the categories router with all HTTP endpoints
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(shared_service)
}

/// Create a new category (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    AdminClaims(_claims): AdminClaims,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> Result<impl IntoResponse, AppError> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// List categories sorted by name
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "Paginated list of categories", body = CategoryListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let page = service.list_categories(filter).await?;
    Ok(Json(page))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = service.get_category(id).await?;
    Ok(Json(category.into()))
}

/// Update a category (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    AdminClaims(_claims): AdminClaims,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = service.update_category(id, input).await?;
    Ok(Json(category.into()))
}

/// Delete a category (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    AdminClaims(_claims): AdminClaims,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
