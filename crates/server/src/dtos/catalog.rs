use chrono::NaiveDateTime;
use database::{
    catalog::Members,
    entities::{
        course_overview,
        flexible_catalog::{self, CatalogKind},
    },
    services::catalog::{CatalogChanges, NewCatalog},
};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use super::available_course::AvailableCourseResponse;

/// Fields shared by every catalog variant
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub id: Uuid,
    /// One of `fixed`, `catalog_courses` or `dynamic`
    #[schema(value_type = String)]
    pub kind: CatalogKind,
    pub name: String,
    pub slug: Option<String>,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl From<flexible_catalog::Model> for CatalogSummary {
    fn from(model: flexible_catalog::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            name: model.name,
            slug: model.slug,
            created: model.created,
            modified: model.modified,
        }
    }
}

/// A catalog with its variant specific fields
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    #[serde(flatten)]
    pub catalog: CatalogSummary,

    /// Course keys of a fixed catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_runs: Option<Vec<String>>,

    /// Available course ids of a catalog-courses catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<i32>>,

    /// Stored filter of a dynamic catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
}

impl From<CatalogSummary> for CatalogResponse {
    fn from(catalog: CatalogSummary) -> Self {
        Self {
            catalog,
            course_runs: None,
            courses: None,
            query_string: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRunResponse {
    pub id: String,
    pub org: String,
    pub number: String,
    pub run: String,
    pub display_name: String,
    pub language: Option<String>,
    pub self_paced: bool,
}

impl From<course_overview::Model> for CourseRunResponse {
    fn from(model: course_overview::Model) -> Self {
        Self {
            id: model.id,
            org: model.org,
            number: model.number,
            run: model.run,
            display_name: model.display_name,
            language: model.language,
            self_paced: model.self_paced,
        }
    }
}

/// Resolved members; exactly one of the lists is present
#[derive(Debug, Serialize, ToSchema)]
pub struct MembersResponse {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_runs: Option<Vec<CourseRunResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<AvailableCourseResponse>>,
}

impl From<Members> for MembersResponse {
    fn from(members: Members) -> Self {
        let count = members.len();
        match members {
            Members::CourseRuns(runs) => Self {
                count,
                course_runs: Some(runs.into_iter().map(Into::into).collect()),
                courses: None,
            },
            Members::AvailableCourses(courses) => Self {
                count,
                course_runs: None,
                courses: Some(courses.into_iter().map(Into::into).collect()),
            },
        }
    }
}

/// Name and slug given when creating any catalog
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewCatalogRequest {
    pub name: String,
    pub slug: Option<String>,
}

impl From<NewCatalogRequest> for NewCatalog {
    fn from(request: NewCatalogRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFixedCatalogRequest {
    #[serde(flatten)]
    pub catalog: NewCatalogRequest,
    /// Course keys such as `course-v1:edX+DemoX+2024`
    #[serde(default)]
    pub course_runs: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCatalogCoursesRequest {
    #[serde(flatten)]
    pub catalog: NewCatalogRequest,
    #[serde(default)]
    pub courses: Vec<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDynamicCatalogRequest {
    #[serde(flatten)]
    pub catalog: NewCatalogRequest,
    /// JSON object of field equality filters, e.g. `{"org": "edX"}`
    pub query_string: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCatalogRequest {
    pub name: Option<String>,
    /// An empty string clears the slug
    pub slug: Option<String>,
}

impl From<UpdateCatalogRequest> for CatalogChanges {
    fn from(request: UpdateCatalogRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQueryRequest {
    pub query_string: Option<String>,
}

/// Members to add or remove: course keys for fixed catalogs, available
/// course ids for catalog-courses catalogs
#[derive(Debug, Deserialize, ToSchema)]
pub struct MembersRequest {
    #[schema(value_type = Vec<Object>)]
    pub members: Vec<Value>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlexibleCatalogParams {
    #[param(value_type = Option<String>)]
    pub kind: Option<CatalogKind>,
    pub name: Option<String>,
    pub slug: Option<String>,
    /// Matches either name or slug
    pub search: Option<String>,
    /// `id`, `name`, `slug`, `created` or `modified`, prefixed with `-` for
    /// descending order
    pub ordering: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FixedCatalogParams {
    pub name: Option<String>,
    pub created_after: Option<NaiveDateTime>,
    pub created_before: Option<NaiveDateTime>,
    pub ordering: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogCoursesParams {
    pub name: Option<String>,
    /// Only catalogs containing this available course
    pub course_id: Option<i32>,
    pub ordering: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DynamicCatalogParams {
    pub name: Option<String>,
}
