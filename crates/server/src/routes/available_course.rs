use crate::{
    dtos::available_course::{
        AvailableCourseParams, AvailableCourseResponse, CreateAvailableCourseRequest,
        UpdateAvailableCourseRequest,
    },
    error::{ApiError, ErrorResponse},
    extract::{Json, Path, Query},
    routes::ordering,
    state::AppState,
};
use axum::{extract::State, http::StatusCode};
use database::{error::CatalogError, services::available_course::AvailableCourseService};
use models::{course_key::CourseKey, ordering::AvailableCourseOrdering};

/// List the available course registry
#[utoipa::path(
    get,
    path = "/api/v0/available-courses",
    params(AvailableCourseParams),
    responses(
        (status = 200, description = "Available courses retrieved successfully", body = Vec<AvailableCourseResponse>),
        (status = 400, description = "Invalid ordering", body = ErrorResponse),
    ),
    tag = "Available courses"
)]
pub async fn list_available_courses(
    State(state): State<AppState>,
    Query(params): Query<AvailableCourseParams>,
) -> Result<Json<Vec<AvailableCourseResponse>>, ApiError> {
    let ordering = ordering(
        params.ordering.as_deref(),
        AvailableCourseOrdering::default(),
    )?;

    let courses = AvailableCourseService::list(&state.db, &params.filter(), ordering).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Register a course run as available. Registering it again returns the
/// existing entry unchanged.
#[utoipa::path(
    post,
    path = "/api/v0/available-courses",
    request_body = CreateAvailableCourseRequest,
    responses(
        (status = 201, description = "Available course created", body = AvailableCourseResponse),
        (status = 200, description = "Course was already registered", body = AvailableCourseResponse),
        (status = 400, description = "Invalid course key", body = ErrorResponse),
        (status = 404, description = "Course run does not exist", body = ErrorResponse),
    ),
    tag = "Available courses"
)]
pub async fn create_available_course(
    State(state): State<AppState>,
    Json(request): Json<CreateAvailableCourseRequest>,
) -> Result<(StatusCode, Json<AvailableCourseResponse>), ApiError> {
    let course: CourseKey = request.course_id.parse()?;

    let status = match AvailableCourseService::find(&state.db, &course).await? {
        Some(_) => StatusCode::OK,
        None => StatusCode::CREATED,
    };

    let created =
        AvailableCourseService::create(&state.db, &state.directory, &course, request.active)
            .await?;

    Ok((status, Json(created.into())))
}

/// Get the registry entry of a course run
#[utoipa::path(
    get,
    path = "/api/v0/available-courses/{course_key}",
    params(
        ("course_key" = String, Path, description = "Course key")
    ),
    responses(
        (status = 200, description = "Available course found", body = AvailableCourseResponse),
        (status = 404, description = "Course is not registered", body = ErrorResponse),
    ),
    tag = "Available courses"
)]
pub async fn get_available_course(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
) -> Result<Json<AvailableCourseResponse>, ApiError> {
    let course: CourseKey = course_key.parse()?;
    let found = AvailableCourseService::get(&state.db, &course).await?;

    Ok(Json(found.into()))
}

/// Activate or deactivate a registered course
#[utoipa::path(
    patch,
    path = "/api/v0/available-courses/{course_key}",
    params(
        ("course_key" = String, Path, description = "Course key")
    ),
    request_body = UpdateAvailableCourseRequest,
    responses(
        (status = 200, description = "Available course updated", body = AvailableCourseResponse),
        (status = 404, description = "Course is not registered", body = ErrorResponse),
    ),
    tag = "Available courses"
)]
pub async fn update_available_course(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
    Json(request): Json<UpdateAvailableCourseRequest>,
) -> Result<Json<AvailableCourseResponse>, ApiError> {
    let course: CourseKey = course_key.parse()?;
    let updated = AvailableCourseService::set_active(&state.db, &course, request.active).await?;

    Ok(Json(updated.into()))
}

/// Remove a course from the registry
#[utoipa::path(
    delete,
    path = "/api/v0/available-courses/{course_key}",
    params(
        ("course_key" = String, Path, description = "Course key")
    ),
    responses(
        (status = 204, description = "Available course deleted"),
        (status = 404, description = "Course is not registered", body = ErrorResponse),
    ),
    tag = "Available courses"
)]
pub async fn delete_available_course(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
) -> Result<StatusCode, ApiError> {
    let course: CourseKey = course_key.parse()?;

    if AvailableCourseService::delete(&state.db, &course).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CatalogError::CourseNotFound(course.to_string()).into())
    }
}
