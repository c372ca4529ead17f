use crate::{
    dtos::catalog::{
        CatalogResponse, CatalogSummary, FlexibleCatalogParams, MembersResponse,
        UpdateCatalogRequest,
    },
    error::{ApiError, ErrorResponse},
    extract::{Json, Path, Query},
    routes::{catalog_response, ordering},
    state::AppState,
};
use axum::{extract::State, http::StatusCode};
use database::{
    error::CatalogError,
    services::catalog::{CatalogFilter, CatalogLookup, CatalogService},
};
use models::ordering::CatalogOrdering;

/// List catalogs of every variant
#[utoipa::path(
    get,
    path = "/api/v0/flexible-catalogs",
    params(FlexibleCatalogParams),
    responses(
        (status = 200, description = "Catalogs retrieved successfully", body = Vec<CatalogSummary>),
        (status = 400, description = "Invalid ordering", body = ErrorResponse),
    ),
    tag = "Catalogs"
)]
pub async fn list_catalogs(
    State(state): State<AppState>,
    Query(params): Query<FlexibleCatalogParams>,
) -> Result<Json<Vec<CatalogSummary>>, ApiError> {
    let ordering = ordering(params.ordering.as_deref(), CatalogOrdering::default())?;

    let filter = CatalogFilter {
        kind: params.kind,
        name: params.name,
        slug: params.slug,
        search: params.search,
        ..Default::default()
    };

    let catalogs = CatalogService::list(&state.db, &filter, ordering).await?;

    Ok(Json(catalogs.into_iter().map(Into::into).collect()))
}

/// Get a catalog by id or slug, rendered as its concrete variant
#[utoipa::path(
    get,
    path = "/api/v0/flexible-catalogs/{lookup}",
    params(
        ("lookup" = String, Path, description = "Catalog id or slug")
    ),
    responses(
        (status = 200, description = "Catalog found", body = CatalogResponse),
        (status = 404, description = "Catalog not found", body = ErrorResponse),
    ),
    tag = "Catalogs"
)]
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(lookup): Path<String>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = CatalogService::get(&state.db, &lookup.as_str().into()).await?;

    Ok(Json(catalog_response(&state.db, catalog).await?))
}

/// Rename a catalog or change its slug
#[utoipa::path(
    patch,
    path = "/api/v0/flexible-catalogs/{lookup}",
    params(
        ("lookup" = String, Path, description = "Catalog id or slug")
    ),
    request_body = UpdateCatalogRequest,
    responses(
        (status = 200, description = "Catalog updated", body = CatalogResponse),
        (status = 400, description = "Invalid name or slug", body = ErrorResponse),
        (status = 404, description = "Catalog not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
    ),
    tag = "Catalogs"
)]
pub async fn update_catalog(
    State(state): State<AppState>,
    Path(lookup): Path<String>,
    Json(request): Json<UpdateCatalogRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog =
        CatalogService::update(&state.db, &lookup.as_str().into(), request.into()).await?;

    Ok(Json(catalog_response(&state.db, catalog).await?))
}

/// Delete a catalog of any variant
#[utoipa::path(
    delete,
    path = "/api/v0/flexible-catalogs/{lookup}",
    params(
        ("lookup" = String, Path, description = "Catalog id or slug")
    ),
    responses(
        (status = 204, description = "Catalog deleted"),
        (status = 404, description = "Catalog not found", body = ErrorResponse),
    ),
    tag = "Catalogs"
)]
pub async fn delete_catalog(
    State(state): State<AppState>,
    Path(lookup): Path<String>,
) -> Result<StatusCode, ApiError> {
    let lookup = CatalogLookup::from(lookup.as_str());

    if CatalogService::delete(&state.db, &lookup).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CatalogError::CatalogNotFound(lookup.to_string()).into())
    }
}

/// Resolve the members of a catalog
#[utoipa::path(
    get,
    path = "/api/v0/flexible-catalogs/{lookup}/members",
    params(
        ("lookup" = String, Path, description = "Catalog id or slug")
    ),
    responses(
        (status = 200, description = "Members resolved", body = MembersResponse),
        (status = 400, description = "The stored query cannot be applied", body = ErrorResponse),
        (status = 404, description = "Catalog not found", body = ErrorResponse),
    ),
    tag = "Catalogs"
)]
pub async fn get_members(
    State(state): State<AppState>,
    Path(lookup): Path<String>,
) -> Result<Json<MembersResponse>, ApiError> {
    let members =
        CatalogService::resolve_members(&state.db, &state.directory, &lookup.as_str().into())
            .await?;

    Ok(Json(members.into()))
}
