use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registry entry marking a course run as offered
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "available_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_overview::Entity",
        from = "Column::CourseId",
        to = "super::course_overview::Column::Id"
    )]
    CourseOverview,
    #[sea_orm(has_many = "super::catalog_courses_member::Entity")]
    CatalogCoursesMembers,
}

impl Related<super::course_overview::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseOverview.def()
    }
}

impl Related<super::catalog_courses_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogCoursesMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
