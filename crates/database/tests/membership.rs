mod common;

use common::{key, seed_available, seed_courses, setup};
use database::{
    catalog::{Catalog, Members},
    directory::DatabaseCourseDirectory,
    error::CatalogError,
    services::{
        catalog::{CatalogService, NewCatalog},
        membership::{MembershipService, MembershipTarget},
    },
};
use models::member_ref::MemberRef;
use sea_orm::{DatabaseConnection, prelude::Uuid};

fn new(name: &str) -> NewCatalog {
    NewCatalog {
        name: name.to_string(),
        slug: None,
    }
}

fn run(raw: &str) -> MemberRef {
    MemberRef::CourseRun(key(raw))
}

async fn members(db: &DatabaseConnection, id: Uuid) -> Members {
    let directory = DatabaseCourseDirectory::new(db.clone());
    CatalogService::get(db, &id.into())
        .await
        .unwrap()
        .resolve_members(db, &directory)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_add_and_remove_course_runs() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;
    let fixed = CatalogService::create_fixed(&db, &directory, new("Fixed"), &[])
        .await
        .unwrap();
    let target = MembershipTarget::Fixed(fixed.base.id);

    let updated = MembershipService::add_members(
        &db,
        &directory,
        target,
        &[run(&courses[1].id), run(&courses[0].id)],
    )
    .await
    .unwrap();
    assert!(matches!(updated, Catalog::Fixed(_)));
    assert!(updated.base().modified >= fixed.base.modified);

    // Adding again does not duplicate
    MembershipService::add_members(&db, &directory, target, &[run(&courses[0].id)])
        .await
        .unwrap();
    assert_eq!(
        members(&db, fixed.base.id).await.course_keys(),
        vec![courses[0].id.clone(), courses[1].id.clone()]
    );

    MembershipService::remove_members(&db, target, &[run(&courses[0].id), run(&courses[2].id)])
        .await
        .unwrap();
    assert_eq!(
        members(&db, fixed.base.id).await.course_keys(),
        vec![courses[1].id.clone()]
    );
}

#[tokio::test]
async fn test_unknown_course_runs_are_dropped() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;
    let fixed = CatalogService::create_fixed(&db, &directory, new("Fixed"), &[])
        .await
        .unwrap();
    let target = MembershipTarget::Fixed(fixed.base.id);

    MembershipService::add_members(
        &db,
        &directory,
        target,
        &[run("course-v1:Nope+None+Never"), run(&courses[2].id)],
    )
    .await
    .unwrap();
    assert_eq!(
        members(&db, fixed.base.id).await.course_keys(),
        vec![courses[2].id.clone()]
    );

    let result = MembershipService::add_members(
        &db,
        &directory,
        target,
        &[run("course-v1:Nope+None+Never")],
    )
    .await;
    assert!(matches!(result, Err(CatalogError::NoEligibleMembers)));
}

#[tokio::test]
async fn test_only_active_available_courses_are_added() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;
    let active = seed_available(&db, &courses[0].id, true).await;
    let inactive = seed_available(&db, &courses[1].id, false).await;
    let catalog = CatalogService::create_catalog_courses(&db, new("Courses"), &[])
        .await
        .unwrap();
    let target = MembershipTarget::CatalogCourses(catalog.base.id);

    let result = MembershipService::add_members(
        &db,
        &directory,
        target,
        &[MemberRef::AvailableCourse(inactive.id)],
    )
    .await;
    assert!(matches!(result, Err(CatalogError::NoEligibleMembers)));
    assert!(members(&db, catalog.base.id).await.is_empty());

    let updated = MembershipService::add_members(
        &db,
        &directory,
        target,
        &[
            MemberRef::AvailableCourse(inactive.id),
            MemberRef::AvailableCourse(active.id),
            MemberRef::AvailableCourse(9999),
        ],
    )
    .await
    .unwrap();
    assert!(matches!(updated, Catalog::Courses(_)));
    assert_eq!(
        members(&db, catalog.base.id).await,
        Members::AvailableCourses(vec![active.clone()])
    );

    MembershipService::remove_members(&db, target, &[MemberRef::AvailableCourse(active.id)])
        .await
        .unwrap();
    assert!(members(&db, catalog.base.id).await.is_empty());
}

#[tokio::test]
async fn test_reference_kind_must_match_variant() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;
    let fixed = CatalogService::create_fixed(&db, &directory, new("Fixed"), &[])
        .await
        .unwrap();
    let catalog = CatalogService::create_catalog_courses(&db, new("Courses"), &[])
        .await
        .unwrap();

    let result = MembershipService::add_members(
        &db,
        &directory,
        MembershipTarget::Fixed(fixed.base.id),
        &[run(&courses[0].id), MemberRef::AvailableCourse(3)],
    )
    .await;
    assert!(matches!(result, Err(CatalogError::InvalidReference(bad)) if bad == vec!["3"]));

    let result = MembershipService::remove_members(
        &db,
        MembershipTarget::CatalogCourses(catalog.base.id),
        &[run(&courses[0].id)],
    )
    .await;
    let expected = vec![courses[0].id.clone()];
    assert!(matches!(result, Err(CatalogError::InvalidReference(bad)) if bad == expected));
}

#[tokio::test]
async fn test_empty_input() {
    let (db, directory) = setup().await;
    let fixed = CatalogService::create_fixed(&db, &directory, new("Fixed"), &[])
        .await
        .unwrap();

    let result =
        MembershipService::remove_members(&db, MembershipTarget::Fixed(fixed.base.id), &[]).await;
    assert!(matches!(result, Err(CatalogError::EmptyInput)));

    let result = MembershipService::add_members(
        &db,
        &directory,
        MembershipTarget::CatalogCourses(Uuid::new_v4()),
        &[],
    )
    .await;
    assert!(matches!(result, Err(CatalogError::EmptyInput)));
}

#[tokio::test]
async fn test_missing_or_mismatched_catalog() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;
    let catalog = CatalogService::create_catalog_courses(&db, new("Courses"), &[])
        .await
        .unwrap();

    let result = MembershipService::add_members(
        &db,
        &directory,
        MembershipTarget::Fixed(Uuid::new_v4()),
        &[run(&courses[0].id)],
    )
    .await;
    assert!(matches!(result, Err(CatalogError::CatalogNotFound(_))));

    // A catalog-courses catalog is not a fixed catalog
    let result = MembershipService::add_members(
        &db,
        &directory,
        MembershipTarget::Fixed(catalog.base.id),
        &[run(&courses[0].id)],
    )
    .await;
    assert!(matches!(result, Err(CatalogError::CatalogNotFound(_))));
}
