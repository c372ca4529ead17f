pub use sea_orm_migration::prelude::*;

mod m20241205_create_catalog_tables;
mod m20241205_add_catalog_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241205_create_catalog_tables::Migration),
            Box::new(m20241205_add_catalog_indexes::Migration),
        ]
    }
}
