use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table for many-to-many relationship between fixed catalogs and course runs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_catalog_course_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub catalog_id: Uuid,
    pub course_id: String,
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
        belongs_to = "super::course_overview::Entity",
        from = "Column::CourseId",
        to = "super::course_overview::Column::Id"
    )]
    CourseOverview,
}

impl Related<super::flexible_catalog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlexibleCatalog.def()
    }
}

impl Related<super::course_overview::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseOverview.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
