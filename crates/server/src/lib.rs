pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{
    Json, Router,
    routing::{get, post, put},
};
use doc::ApiDoc;
use routes::{
    available_course, catalog_courses, dynamic_catalog, fixed_catalog, flexible_catalog, health,
};
use state::AppState;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;

/// Routes served under `/api/v0`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/flexible-catalogs", get(flexible_catalog::list_catalogs))
        .route(
            "/flexible-catalogs/{lookup}",
            get(flexible_catalog::get_catalog)
                .patch(flexible_catalog::update_catalog)
                .delete(flexible_catalog::delete_catalog),
        )
        .route(
            "/flexible-catalogs/{lookup}/members",
            get(flexible_catalog::get_members),
        )
        .route(
            "/fixed-catalogs",
            get(fixed_catalog::list_fixed_catalogs).post(fixed_catalog::create_fixed_catalog),
        )
        .route("/fixed-catalogs/{id}", get(fixed_catalog::get_fixed_catalog))
        .route(
            "/fixed-catalogs/{id}/course-runs",
            post(fixed_catalog::add_course_runs).delete(fixed_catalog::remove_course_runs),
        )
        .route(
            "/catalog-courses",
            get(catalog_courses::list_catalog_courses)
                .post(catalog_courses::create_catalog_courses),
        )
        .route(
            "/catalog-courses/{id}",
            get(catalog_courses::get_catalog_courses),
        )
        .route(
            "/catalog-courses/{id}/courses",
            post(catalog_courses::add_courses).delete(catalog_courses::remove_courses),
        )
        .route(
            "/dynamic-catalogs",
            get(dynamic_catalog::list_dynamic_catalogs)
                .post(dynamic_catalog::create_dynamic_catalog),
        )
        .route(
            "/dynamic-catalogs/{id}",
            get(dynamic_catalog::get_dynamic_catalog),
        )
        .route("/dynamic-catalogs/{id}/query", put(dynamic_catalog::set_query))
        .route(
            "/available-courses",
            get(available_course::list_available_courses)
                .post(available_course::create_available_course),
        )
        .route(
            "/available-courses/{course_key}",
            get(available_course::get_available_course)
                .patch(available_course::update_available_course)
                .delete(available_course::delete_available_course),
        )
}

/// The full application around an already layered API router
pub fn app_with(state: AppState, api: Router<AppState>) -> Router {
    Router::new()
        .nest("/api/v0", api)
        .route("/health", get(health::health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(CompressionLayer::new())
        .with_state(state)
}

pub fn app(state: AppState) -> Router {
    app_with(state, api_routes())
}
