use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which variant table extends a catalog row
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "catalog_courses")]
    CatalogCourses,
    #[sea_orm(string_value = "dynamic")]
    Dynamic,
}

/// Base record shared by every catalog variant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "flexible_catalogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: CatalogKind,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: Option<String>, // blank slugs are stored as NULL
    pub created: DateTime,
    pub modified: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::dynamic_catalog::Entity")]
    DynamicCatalog,
    #[sea_orm(has_many = "super::fixed_catalog_course_run::Entity")]
    FixedCatalogCourseRuns,
    #[sea_orm(has_many = "super::catalog_courses_member::Entity")]
    CatalogCoursesMembers,
}

impl Related<super::dynamic_catalog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DynamicCatalog.def()
    }
}

impl Related<super::fixed_catalog_course_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedCatalogCourseRuns.def()
    }
}

impl Related<super::catalog_courses_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogCoursesMembers.def()
    }
}

// Many-to-many relationship with course runs (fixed catalogs)
impl Related<super::course_overview::Entity> for Entity {
    fn to() -> RelationDef {
        super::fixed_catalog_course_run::Relation::CourseOverview.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::fixed_catalog_course_run::Relation::FlexibleCatalog
                .def()
                .rev(),
        )
    }
}

// Many-to-many relationship with available courses (catalog courses)
impl Related<super::available_course::Entity> for Entity {
    fn to() -> RelationDef {
        super::catalog_courses_member::Relation::AvailableCourse.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::catalog_courses_member::Relation::FlexibleCatalog
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
