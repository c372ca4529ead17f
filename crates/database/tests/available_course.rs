mod common;

use common::{key, seed_available, seed_courses, setup};
use database::{
    error::CatalogError,
    services::available_course::{AvailableCourseFilter, AvailableCourseService},
};
use models::ordering::{AvailableCourseOrderField, AvailableCourseOrdering, Ordering};

#[tokio::test]
async fn test_create_is_idempotent() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;
    let course = key(&courses[0].id);

    let first = AvailableCourseService::create(&db, &directory, &course, false)
        .await
        .unwrap();
    assert!(!first.active);

    // A second call returns the existing entry without touching `active`
    let second = AvailableCourseService::create(&db, &directory, &course, true)
        .await
        .unwrap();
    assert_eq!(second, first);

    let all = AvailableCourseService::list(
        &db,
        &AvailableCourseFilter::default(),
        AvailableCourseOrdering::default(),
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_unknown_course() {
    let (db, directory) = setup().await;
    seed_courses(&db).await;
    let missing = key("course-v1:Nope+None+Never");

    let result = AvailableCourseService::create(&db, &directory, &missing, true).await;
    assert!(matches!(result, Err(CatalogError::CourseNotFound(id)) if id == missing.to_string()));

    let result = AvailableCourseService::set_active(&db, &missing, false).await;
    assert!(matches!(result, Err(CatalogError::CourseNotFound(_))));

    let result = AvailableCourseService::get(&db, &missing).await;
    assert!(matches!(result, Err(CatalogError::CourseNotFound(_))));

    assert!(!AvailableCourseService::delete(&db, &missing).await.unwrap());
}

#[tokio::test]
async fn test_set_active() {
    let (db, _) = setup().await;
    let courses = seed_courses(&db).await;
    let created = seed_available(&db, &courses[1].id, true).await;
    let course = key(&courses[1].id);

    let updated = AvailableCourseService::set_active(&db, &course, false)
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert!(!updated.active);

    let unchanged = AvailableCourseService::set_active(&db, &course, false)
        .await
        .unwrap();
    assert_eq!(unchanged, updated);

    assert!(!AvailableCourseService::get(&db, &course).await.unwrap().active);
}

#[tokio::test]
async fn test_delete() {
    let (db, _) = setup().await;
    let courses = seed_courses(&db).await;
    seed_available(&db, &courses[2].id, true).await;
    let course = key(&courses[2].id);

    assert!(AvailableCourseService::delete(&db, &course).await.unwrap());
    assert!(!AvailableCourseService::delete(&db, &course).await.unwrap());
    assert!(
        AvailableCourseService::find(&db, &course)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_list_filters_and_ordering() {
    let (db, _) = setup().await;
    let courses = seed_courses(&db).await;
    let demo = seed_available(&db, &courses[0].id, true).await;
    let rust = seed_available(&db, &courses[1].id, false).await;
    let circuits = seed_available(&db, &courses[2].id, true).await;

    let ids = |models: Vec<database::entities::available_course::Model>| {
        models.into_iter().map(|m| m.id).collect::<Vec<_>>()
    };

    let all = AvailableCourseService::list(
        &db,
        &AvailableCourseFilter::default(),
        AvailableCourseOrdering::default(),
    )
    .await
    .unwrap();
    assert_eq!(ids(all), vec![demo.id, rust.id, circuits.id]);

    let active = AvailableCourseFilter {
        active: Some(true),
        ..Default::default()
    };
    let found =
        AvailableCourseService::list(&db, &active, Ordering::desc(AvailableCourseOrderField::Id))
            .await
            .unwrap();
    assert_eq!(ids(found), vec![circuits.id, demo.id]);

    let by_course = AvailableCourseFilter {
        course_id: Some(courses[1].id.clone()),
        ..Default::default()
    };
    let found = AvailableCourseService::list(&db, &by_course, AvailableCourseOrdering::default())
        .await
        .unwrap();
    assert_eq!(ids(found), vec![rust.id]);

    let search = AvailableCourseFilter {
        search: Some("rust".to_string()),
        ..Default::default()
    };
    let found = AvailableCourseService::list(&db, &search, AvailableCourseOrdering::default())
        .await
        .unwrap();
    assert_eq!(ids(found), vec![rust.id]);

    let found = AvailableCourseService::list(
        &db,
        &AvailableCourseFilter::default(),
        "course".parse().unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(ids(found), vec![circuits.id, demo.id, rust.id]);
}
