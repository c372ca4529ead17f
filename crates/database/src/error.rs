use crate::directory::DirectoryError;
use models::{course_key::CourseKeyError, query::QueryError, slug::SlugError};
use sea_orm::DbErr;
use thiserror::Error;

/// Every failure a catalog operation can report
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("slug \"{0}\" is already in use")]
    DuplicateSlug(String),

    /// The query string could not be parsed or applied
    #[error("malformed query: {0}")]
    MalformedQuery(#[source] QueryFailure),

    #[error("query string must be a JSON object, got {0}")]
    InvalidQueryShape(&'static str),

    #[error("invalid member references: {}", .0.join(", "))]
    InvalidReference(Vec<String>),

    #[error("no references were provided")]
    EmptyInput,

    #[error("none of the supplied members are eligible")]
    NoEligibleMembers,

    #[error(transparent)]
    InvalidSlug(#[from] SlugError),

    #[error("catalog name must not be blank")]
    InvalidName,

    #[error(transparent)]
    InvalidCourseKey(#[from] CourseKeyError),

    #[error("store error: {0}")]
    Store(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum QueryFailure {
    #[error(transparent)]
    Parse(QueryError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl From<QueryError> for CatalogError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidShape(found) => Self::InvalidQueryShape(found),
            err => Self::MalformedQuery(QueryFailure::Parse(err)),
        }
    }
}

impl CatalogError {
    /// Maps a failed directory lookup by id, where only store failures occur
    pub(crate) fn lookup_failed(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Store(err) => Self::Store(err),
            err => Self::MalformedQuery(err.into()),
        }
    }

    /// Stable machine readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatalogNotFound(_) => "catalog_not_found",
            Self::CourseNotFound(_) => "course_not_found",
            Self::DuplicateSlug(_) => "duplicate_slug",
            Self::MalformedQuery(_) => "malformed_query",
            Self::InvalidQueryShape(_) => "invalid_query_shape",
            Self::InvalidReference(_) => "invalid_reference",
            Self::EmptyInput => "empty_input",
            Self::NoEligibleMembers => "no_eligible_members",
            Self::InvalidSlug(_) => "invalid_slug",
            Self::InvalidName => "invalid_name",
            Self::InvalidCourseKey(_) => "invalid_course_key",
            Self::Store(_) => "store_error",
        }
    }
}
