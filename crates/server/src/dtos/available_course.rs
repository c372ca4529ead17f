use database::{
    entities::available_course, services::available_course::AvailableCourseFilter,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableCourseResponse {
    pub id: i32,
    pub course_id: String,
    pub active: bool,
}

impl From<available_course::Model> for AvailableCourseResponse {
    fn from(model: available_course::Model) -> Self {
        Self {
            id: model.id,
            course_id: model.course_id,
            active: model.active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAvailableCourseRequest {
    /// Course key of a published course run
    pub course_id: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAvailableCourseRequest {
    pub active: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableCourseParams {
    pub course_id: Option<String>,
    pub active: Option<bool>,
    /// Case-insensitive substring of the course display name
    pub search: Option<String>,
    /// `id`, `course` or `active`, prefixed with `-` for descending order
    pub ordering: Option<String>,
}

impl AvailableCourseParams {
    pub fn filter(&self) -> AvailableCourseFilter {
        AvailableCourseFilter {
            course_id: self.course_id.clone(),
            active: self.active,
            search: self.search.clone(),
        }
    }
}
