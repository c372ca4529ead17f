use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::CatalogError;
use log::error;
use models::{course_key::CourseKeyError, ordering::OrderingError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error kind, e.g. `catalog_not_found`
    pub error: String,
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::Catalog(CatalogError::Store(err))
    }
}

impl From<CourseKeyError> for ApiError {
    fn from(err: CourseKeyError) -> Self {
        Self::Catalog(CatalogError::InvalidCourseKey(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::CatalogNotFound(_) | CatalogError::CourseNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                CatalogError::DuplicateSlug(_) => StatusCode::CONFLICT,
                CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CatalogError::MalformedQuery(_)
                | CatalogError::InvalidQueryShape(_)
                | CatalogError::InvalidReference(_)
                | CatalogError::EmptyInput
                | CatalogError::NoEligibleMembers
                | CatalogError::InvalidSlug(_)
                | CatalogError::InvalidName
                | CatalogError::InvalidCourseKey(_) => StatusCode::BAD_REQUEST,
            },
            Self::Ordering(_) => StatusCode::BAD_REQUEST,
            Self::Body(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
            Self::Query(rejection) => rejection.status(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Catalog(err) => err.kind(),
            Self::Ordering(_) => "invalid_ordering",
            Self::Body(_) => "invalid_body",
            Self::Path(_) => "invalid_path",
            Self::Query(_) => "invalid_query",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store details stay in the log
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {self}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: self.kind().to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CatalogError::CatalogNotFound("x".into()), StatusCode::NOT_FOUND),
            (CatalogError::CourseNotFound("x".into()), StatusCode::NOT_FOUND),
            (CatalogError::DuplicateSlug("x".into()), StatusCode::CONFLICT),
            (CatalogError::EmptyInput, StatusCode::BAD_REQUEST),
            (CatalogError::NoEligibleMembers, StatusCode::BAD_REQUEST),
            (CatalogError::InvalidQueryShape("an array"), StatusCode::BAD_REQUEST),
            (
                CatalogError::Store(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_ordering_is_bad_request() {
        let err = ApiError::from(OrderingError("bogus".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "invalid_ordering");
    }
}
