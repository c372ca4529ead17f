use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Non-blank slugs are unique across every variant; blank ones are NULL
        manager
            .create_index(
                Index::create()
                    .name("idx_flexible_catalogs_slug")
                    .table(FlexibleCatalogs::Table)
                    .col(FlexibleCatalogs::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flexible_catalogs_kind_name")
                    .table(FlexibleCatalogs::Table)
                    .col(FlexibleCatalogs::Kind)
                    .col(FlexibleCatalogs::Name)
                    .to_owned(),
            )
            .await?;

        // Registry lookups are by course key
        manager
            .create_index(
                Index::create()
                    .name("idx_available_courses_course_id")
                    .table(AvailableCourses::Table)
                    .col(AvailableCourses::CourseId)
                    .to_owned(),
            )
            .await?;

        // A member appears at most once per catalog
        manager
            .create_index(
                Index::create()
                    .name("idx_fixed_catalog_course_runs_catalog_course")
                    .table(FixedCatalogCourseRuns::Table)
                    .col(FixedCatalogCourseRuns::CatalogId)
                    .col(FixedCatalogCourseRuns::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_courses_members_catalog_course")
                    .table(CatalogCoursesMembers::Table)
                    .col(CatalogCoursesMembers::CatalogId)
                    .col(CatalogCoursesMembers::AvailableCourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_catalog_courses_members_catalog_course",
            "idx_fixed_catalog_course_runs_catalog_course",
            "idx_available_courses_course_id",
            "idx_flexible_catalogs_kind_name",
            "idx_flexible_catalogs_slug",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum FlexibleCatalogs {
    Table,
    Kind,
    Name,
    Slug,
}

#[derive(Iden)]
enum AvailableCourses {
    Table,
    CourseId,
}

#[derive(Iden)]
enum FixedCatalogCourseRuns {
    Table,
    CatalogId,
    CourseId,
}

#[derive(Iden)]
enum CatalogCoursesMembers {
    Table,
    CatalogId,
    AvailableCourseId,
}
