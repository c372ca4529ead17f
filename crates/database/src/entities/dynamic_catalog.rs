use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Variant extension holding the stored filter of a dynamic catalog
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dynamic_catalogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub catalog_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub query_string: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::flexible_catalog::Entity",
        from = "Column::CatalogId",
        to = "super::flexible_catalog::Column::Id"
    )]
    FlexibleCatalog,
}

impl Related<super::flexible_catalog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlexibleCatalog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
