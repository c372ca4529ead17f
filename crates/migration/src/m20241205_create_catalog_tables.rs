use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create course_overviews table (owned by the course directory)
        manager
            .create_table(
                Table::create()
                    .table(CourseOverviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseOverviews::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseOverviews::Org).string().not_null())
                    .col(ColumnDef::new(CourseOverviews::Number).string().not_null())
                    .col(ColumnDef::new(CourseOverviews::Run).string().not_null())
                    .col(
                        ColumnDef::new(CourseOverviews::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseOverviews::Language).string())
                    .col(
                        ColumnDef::new(CourseOverviews::CatalogVisibility)
                            .string()
                            .not_null()
                            .default("both"),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::SelfPaced)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::InvitationOnly)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create available_courses table
        manager
            .create_table(
                Table::create()
                    .table(AvailableCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailableCourses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AvailableCourses::CourseId).string().not_null())
                    .col(
                        ColumnDef::new(AvailableCourses::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-available_courses-course_id")
                            .from(AvailableCourses::Table, AvailableCourses::CourseId)
                            .to(CourseOverviews::Table, CourseOverviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create flexible_catalogs table (base record of every catalog variant)
        manager
            .create_table(
                Table::create()
                    .table(FlexibleCatalogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FlexibleCatalogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FlexibleCatalogs::Kind)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FlexibleCatalogs::Name).string().not_null())
                    .col(ColumnDef::new(FlexibleCatalogs::Slug).string())
                    .col(
                        ColumnDef::new(FlexibleCatalogs::Created)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FlexibleCatalogs::Modified)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create dynamic_catalogs table (variant extension)
        manager
            .create_table(
                Table::create()
                    .table(DynamicCatalogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DynamicCatalogs::CatalogId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DynamicCatalogs::QueryString).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-dynamic_catalogs-catalog_id")
                            .from(DynamicCatalogs::Table, DynamicCatalogs::CatalogId)
                            .to(FlexibleCatalogs::Table, FlexibleCatalogs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create fixed_catalog_course_runs junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(FixedCatalogCourseRuns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FixedCatalogCourseRuns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FixedCatalogCourseRuns::CatalogId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FixedCatalogCourseRuns::CourseId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fixed_catalog_course_runs-catalog_id")
                            .from(
                                FixedCatalogCourseRuns::Table,
                                FixedCatalogCourseRuns::CatalogId,
                            )
                            .to(FlexibleCatalogs::Table, FlexibleCatalogs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fixed_catalog_course_runs-course_id")
                            .from(
                                FixedCatalogCourseRuns::Table,
                                FixedCatalogCourseRuns::CourseId,
                            )
                            .to(CourseOverviews::Table, CourseOverviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create catalog_courses_members junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CatalogCoursesMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogCoursesMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogCoursesMembers::CatalogId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogCoursesMembers::AvailableCourseId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-catalog_courses_members-catalog_id")
                            .from(
                                CatalogCoursesMembers::Table,
                                CatalogCoursesMembers::CatalogId,
                            )
                            .to(FlexibleCatalogs::Table, FlexibleCatalogs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-catalog_courses_members-available_course_id")
                            .from(
                                CatalogCoursesMembers::Table,
                                CatalogCoursesMembers::AvailableCourseId,
                            )
                            .to(AvailableCourses::Table, AvailableCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of dependencies
        manager
            .drop_table(Table::drop().table(CatalogCoursesMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FixedCatalogCourseRuns::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DynamicCatalogs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FlexibleCatalogs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AvailableCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseOverviews::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum CourseOverviews {
    Table,
    Id,
    Org,
    Number,
    Run,
    DisplayName,
    Language,
    CatalogVisibility,
    SelfPaced,
    InvitationOnly,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum AvailableCourses {
    Table,
    Id,
    CourseId,
    Active,
}

#[derive(Iden)]
enum FlexibleCatalogs {
    Table,
    Id,
    Kind,
    Name,
    Slug,
    Created,
    Modified,
}

#[derive(Iden)]
enum DynamicCatalogs {
    Table,
    CatalogId,
    QueryString,
}

#[derive(Iden)]
enum FixedCatalogCourseRuns {
    Table,
    Id,
    CatalogId,
    CourseId,
}

#[derive(Iden)]
enum CatalogCoursesMembers {
    Table,
    Id,
    CatalogId,
    AvailableCourseId,
}
