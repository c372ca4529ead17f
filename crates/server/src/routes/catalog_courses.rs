use crate::{
    dtos::catalog::{
        CatalogCoursesParams, CatalogResponse, CreateCatalogCoursesRequest, MembersRequest,
    },
    error::{ApiError, ErrorResponse},
    extract::{Json, Path, Query},
    routes::{catalog_response, catalog_responses, member_refs, ordering},
    state::AppState,
};
use axum::{extract::State, http::StatusCode};
use database::{
    entities::flexible_catalog::CatalogKind,
    services::{
        catalog::{CatalogFilter, CatalogService},
        membership::{MembershipService, MembershipTarget},
    },
};
use models::ordering::CatalogOrdering;
use sea_orm::prelude::Uuid;

/// List catalogs of available courses
#[utoipa::path(
    get,
    path = "/api/v0/catalog-courses",
    params(CatalogCoursesParams),
    responses(
        (status = 200, description = "Catalogs retrieved successfully", body = Vec<CatalogResponse>),
        (status = 400, description = "Invalid ordering", body = ErrorResponse),
    ),
    tag = "Catalog courses"
)]
pub async fn list_catalog_courses(
    State(state): State<AppState>,
    Query(params): Query<CatalogCoursesParams>,
) -> Result<Json<Vec<CatalogResponse>>, ApiError> {
    let ordering = ordering(params.ordering.as_deref(), CatalogOrdering::default())?;

    let filter = CatalogFilter {
        kind: Some(CatalogKind::CatalogCourses),
        name: params.name,
        available_course_id: params.course_id,
        ..Default::default()
    };

    let catalogs = CatalogService::list(&state.db, &filter, ordering).await?;

    Ok(Json(catalog_responses(&state.db, catalogs).await?))
}

/// Create a catalog of available courses
#[utoipa::path(
    post,
    path = "/api/v0/catalog-courses",
    request_body = CreateCatalogCoursesRequest,
    responses(
        (status = 201, description = "Catalog created", body = CatalogResponse),
        (status = 400, description = "Invalid name, slug or course id", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
    ),
    tag = "Catalog courses"
)]
pub async fn create_catalog_courses(
    State(state): State<AppState>,
    Json(request): Json<CreateCatalogCoursesRequest>,
) -> Result<(StatusCode, Json<CatalogResponse>), ApiError> {
    let catalog =
        CatalogService::create_catalog_courses(&state.db, request.catalog.into(), &request.courses)
            .await?;

    let response = catalog_response(&state.db, catalog.into()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a catalog of available courses
#[utoipa::path(
    get,
    path = "/api/v0/catalog-courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    responses(
        (status = 200, description = "Catalog found", body = CatalogResponse),
        (status = 404, description = "No catalog-courses catalog with this id", body = ErrorResponse),
    ),
    tag = "Catalog courses"
)]
pub async fn get_catalog_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = CatalogService::get_catalog_courses(&state.db, id).await?;

    Ok(Json(catalog_response(&state.db, catalog.into()).await?))
}

/// Add active available courses to a catalog
#[utoipa::path(
    post,
    path = "/api/v0/catalog-courses/{id}/courses",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    request_body = MembersRequest,
    responses(
        (status = 200, description = "Courses added", body = CatalogResponse),
        (status = 400, description = "Invalid, empty or ineligible references", body = ErrorResponse),
        (status = 404, description = "No catalog-courses catalog with this id", body = ErrorResponse),
    ),
    tag = "Catalog courses"
)]
pub async fn add_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MembersRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let refs = member_refs(&request.members)?;
    let catalog = MembershipService::add_members(
        &state.db,
        &state.directory,
        MembershipTarget::CatalogCourses(id),
        &refs,
    )
    .await?;

    Ok(Json(catalog_response(&state.db, catalog).await?))
}

/// Remove available courses from a catalog
#[utoipa::path(
    delete,
    path = "/api/v0/catalog-courses/{id}/courses",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    request_body = MembersRequest,
    responses(
        (status = 200, description = "Courses removed", body = CatalogResponse),
        (status = 400, description = "Invalid or empty references", body = ErrorResponse),
        (status = 404, description = "No catalog-courses catalog with this id", body = ErrorResponse),
    ),
    tag = "Catalog courses"
)]
pub async fn remove_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MembersRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let refs = member_refs(&request.members)?;
    let catalog =
        MembershipService::remove_members(&state.db, MembershipTarget::CatalogCourses(id), &refs)
            .await?;

    Ok(Json(catalog_response(&state.db, catalog).await?))
}
