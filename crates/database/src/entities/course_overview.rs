use models::course_key::{CourseKey, CourseKeyError};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A course run as published by the course directory
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_overviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // course key
    pub org: String,
    pub number: String,
    pub run: String,
    pub display_name: String,
    pub language: Option<String>,
    pub catalog_visibility: String, // both, about, none
    pub self_paced: bool,
    pub invitation_only: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn course_key(&self) -> Result<CourseKey, CourseKeyError> {
        self.id.parse()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::available_course::Entity")]
    AvailableCourses,
    #[sea_orm(has_many = "super::fixed_catalog_course_run::Entity")]
    FixedCatalogCourseRuns,
}

impl Related<super::available_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailableCourses.def()
    }
}

impl Related<super::fixed_catalog_course_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedCatalogCourseRuns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
