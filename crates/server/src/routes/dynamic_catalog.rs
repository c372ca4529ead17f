use crate::{
    dtos::catalog::{
        CatalogResponse, CreateDynamicCatalogRequest, DynamicCatalogParams, SetQueryRequest,
    },
    error::{ApiError, ErrorResponse},
    extract::{Json, Path, Query},
    routes::{catalog_response, catalog_responses},
    state::AppState,
};
use axum::{extract::State, http::StatusCode};
use database::{
    entities::flexible_catalog::CatalogKind,
    services::catalog::{CatalogFilter, CatalogService},
};
use models::ordering::CatalogOrdering;
use sea_orm::prelude::Uuid;

/// List dynamic catalogs with their stored queries
#[utoipa::path(
    get,
    path = "/api/v0/dynamic-catalogs",
    params(DynamicCatalogParams),
    responses(
        (status = 200, description = "Dynamic catalogs retrieved successfully", body = Vec<CatalogResponse>),
    ),
    tag = "Dynamic catalogs"
)]
pub async fn list_dynamic_catalogs(
    State(state): State<AppState>,
    Query(params): Query<DynamicCatalogParams>,
) -> Result<Json<Vec<CatalogResponse>>, ApiError> {
    let filter = CatalogFilter {
        kind: Some(CatalogKind::Dynamic),
        name: params.name,
        ..Default::default()
    };

    let catalogs = CatalogService::list(&state.db, &filter, CatalogOrdering::default()).await?;

    Ok(Json(catalog_responses(&state.db, catalogs).await?))
}

/// Create a dynamic catalog. The query is stored as given and checked when
/// members are resolved.
#[utoipa::path(
    post,
    path = "/api/v0/dynamic-catalogs",
    request_body = CreateDynamicCatalogRequest,
    responses(
        (status = 201, description = "Dynamic catalog created", body = CatalogResponse),
        (status = 400, description = "Invalid name or slug", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
    ),
    tag = "Dynamic catalogs"
)]
pub async fn create_dynamic_catalog(
    State(state): State<AppState>,
    Json(request): Json<CreateDynamicCatalogRequest>,
) -> Result<(StatusCode, Json<CatalogResponse>), ApiError> {
    let catalog =
        CatalogService::create_dynamic(&state.db, request.catalog.into(), request.query_string)
            .await?;

    let response = catalog_response(&state.db, catalog.into()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a dynamic catalog
#[utoipa::path(
    get,
    path = "/api/v0/dynamic-catalogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    responses(
        (status = 200, description = "Dynamic catalog found", body = CatalogResponse),
        (status = 404, description = "No dynamic catalog with this id", body = ErrorResponse),
    ),
    tag = "Dynamic catalogs"
)]
pub async fn get_dynamic_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = CatalogService::get_dynamic(&state.db, id).await?;

    Ok(Json(catalog_response(&state.db, catalog.into()).await?))
}

/// Replace the stored query of a dynamic catalog
#[utoipa::path(
    put,
    path = "/api/v0/dynamic-catalogs/{id}/query",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    request_body = SetQueryRequest,
    responses(
        (status = 200, description = "Query replaced", body = CatalogResponse),
        (status = 404, description = "No dynamic catalog with this id", body = ErrorResponse),
    ),
    tag = "Dynamic catalogs"
)]
pub async fn set_query(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetQueryRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = CatalogService::set_query_string(&state.db, id, request.query_string).await?;

    Ok(Json(catalog_response(&state.db, catalog.into()).await?))
}
