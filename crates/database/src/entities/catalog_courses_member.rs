use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table linking catalog-courses catalogs to available courses
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_courses_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub catalog_id: Uuid,
    pub available_course_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::flexible_catalog::Entity",
        from = "Column::CatalogId",
        to = "super::flexible_catalog::Column::Id"
    )]
    FlexibleCatalog,
    #[sea_orm(
        belongs_to = "super::available_course::Entity",
        from = "Column::AvailableCourseId",
        to = "super::available_course::Column::Id"
    )]
    AvailableCourse,
}

impl Related<super::flexible_catalog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlexibleCatalog.def()
    }
}

impl Related<super::available_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailableCourse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
