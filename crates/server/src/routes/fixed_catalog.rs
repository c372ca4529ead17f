use crate::{
    dtos::catalog::{
        CatalogResponse, CreateFixedCatalogRequest, FixedCatalogParams, MembersRequest,
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
use models::{
    course_key::CourseKey,
    ordering::{CatalogOrderField, Ordering},
};
use sea_orm::prelude::Uuid;

/// List fixed catalogs with their course runs
#[utoipa::path(
    get,
    path = "/api/v0/fixed-catalogs",
    params(FixedCatalogParams),
    responses(
        (status = 200, description = "Fixed catalogs retrieved successfully", body = Vec<CatalogResponse>),
        (status = 400, description = "Invalid ordering", body = ErrorResponse),
    ),
    tag = "Fixed catalogs"
)]
pub async fn list_fixed_catalogs(
    State(state): State<AppState>,
    Query(params): Query<FixedCatalogParams>,
) -> Result<Json<Vec<CatalogResponse>>, ApiError> {
    let ordering = ordering(
        params.ordering.as_deref(),
        Ordering::asc(CatalogOrderField::Created),
    )?;

    let filter = CatalogFilter {
        kind: Some(CatalogKind::Fixed),
        name: params.name,
        created_after: params.created_after,
        created_before: params.created_before,
        ..Default::default()
    };

    let catalogs = CatalogService::list(&state.db, &filter, ordering).await?;

    Ok(Json(catalog_responses(&state.db, catalogs).await?))
}

/// Create a fixed catalog, optionally with its first course runs
#[utoipa::path(
    post,
    path = "/api/v0/fixed-catalogs",
    request_body = CreateFixedCatalogRequest,
    responses(
        (status = 201, description = "Fixed catalog created", body = CatalogResponse),
        (status = 400, description = "Invalid name, slug or course key", body = ErrorResponse),
        (status = 404, description = "A course run does not exist", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
    ),
    tag = "Fixed catalogs"
)]
pub async fn create_fixed_catalog(
    State(state): State<AppState>,
    Json(request): Json<CreateFixedCatalogRequest>,
) -> Result<(StatusCode, Json<CatalogResponse>), ApiError> {
    let course_runs = request
        .course_runs
        .iter()
        .map(|key| key.parse::<CourseKey>())
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = CatalogService::create_fixed(
        &state.db,
        &state.directory,
        request.catalog.into(),
        &course_runs,
    )
    .await?;

    let response = catalog_response(&state.db, catalog.into()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a fixed catalog
#[utoipa::path(
    get,
    path = "/api/v0/fixed-catalogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    responses(
        (status = 200, description = "Fixed catalog found", body = CatalogResponse),
        (status = 404, description = "No fixed catalog with this id", body = ErrorResponse),
    ),
    tag = "Fixed catalogs"
)]
pub async fn get_fixed_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = CatalogService::get_fixed(&state.db, id).await?;

    Ok(Json(catalog_response(&state.db, catalog.into()).await?))
}

/// Add course runs to a fixed catalog
#[utoipa::path(
    post,
    path = "/api/v0/fixed-catalogs/{id}/course-runs",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    request_body = MembersRequest,
    responses(
        (status = 200, description = "Course runs added", body = CatalogResponse),
        (status = 400, description = "Invalid, empty or ineligible references", body = ErrorResponse),
        (status = 404, description = "No fixed catalog with this id", body = ErrorResponse),
    ),
    tag = "Fixed catalogs"
)]
pub async fn add_course_runs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MembersRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let refs = member_refs(&request.members)?;
    let catalog = MembershipService::add_members(
        &state.db,
        &state.directory,
        MembershipTarget::Fixed(id),
        &refs,
    )
    .await?;

    Ok(Json(catalog_response(&state.db, catalog).await?))
}

/// Remove course runs from a fixed catalog
#[utoipa::path(
    delete,
    path = "/api/v0/fixed-catalogs/{id}/course-runs",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    request_body = MembersRequest,
    responses(
        (status = 200, description = "Course runs removed", body = CatalogResponse),
        (status = 400, description = "Invalid or empty references", body = ErrorResponse),
        (status = 404, description = "No fixed catalog with this id", body = ErrorResponse),
    ),
    tag = "Fixed catalogs"
)]
pub async fn remove_course_runs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MembersRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let refs = member_refs(&request.members)?;
    let catalog =
        MembershipService::remove_members(&state.db, MembershipTarget::Fixed(id), &refs).await?;

    Ok(Json(catalog_response(&state.db, catalog).await?))
}
