mod common;

use common::{seed_courses, setup};
use database::{
    catalog::{Catalog, Members},
    directory::{CourseDirectory, DirectoryError},
    error::{CatalogError, QueryFailure},
    services::catalog::{CatalogService, NewCatalog},
};
use models::query::CourseQuery;

async fn dynamic(db: &sea_orm::DatabaseConnection, query: Option<&str>) -> Catalog {
    let created = CatalogService::create_dynamic(
        db,
        NewCatalog {
            name: "Dynamic".to_string(),
            slug: None,
        },
        query.map(str::to_string),
    )
    .await
    .unwrap();

    // Always go through the polymorphic lookup
    CatalogService::get(db, &created.base.id.into()).await.unwrap()
}

#[tokio::test]
async fn test_resolution_matches_directory_filter() {
    let (db, directory) = setup().await;
    seed_courses(&db).await;

    for raw in [
        r#"{"org": "edX"}"#,
        r#"{"org": "edX", "self_paced": true}"#,
        r#"{"display_name": "Circuits"}"#,
        r#"{"language": null}"#,
        r#"{"org": "nobody"}"#,
        "{}",
    ] {
        let catalog = dynamic(&db, Some(raw)).await;
        let members = catalog.resolve_members(&db, &directory).await.unwrap();

        let query = CourseQuery::parse(Some(raw)).unwrap().unwrap();
        let expected = directory.filter(&query).await.unwrap();

        assert_eq!(members, Members::CourseRuns(expected), "query {raw}");
    }
}

#[tokio::test]
async fn test_conjunction_of_predicates() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;

    let catalog = dynamic(&db, Some(r#"{"org": "edX", "self_paced": true}"#)).await;
    let members = catalog.resolve_members(&db, &directory).await.unwrap();

    assert_eq!(members.course_keys(), vec![courses[0].id.clone()]);
}

#[tokio::test]
async fn test_empty_query_resolves_to_nothing() {
    let (db, directory) = setup().await;
    seed_courses(&db).await;

    for query in [None, Some(""), Some("   ")] {
        let catalog = dynamic(&db, query).await;
        let members = catalog.resolve_members(&db, &directory).await.unwrap();
        assert!(members.is_empty());
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let (db, directory) = setup().await;

    let catalog = dynamic(&db, Some("{not json")).await;
    let result = catalog.resolve_members(&db, &directory).await;

    assert!(matches!(
        result,
        Err(CatalogError::MalformedQuery(QueryFailure::Parse(_)))
    ));
}

#[tokio::test]
async fn test_non_object_query() {
    let (db, directory) = setup().await;

    for raw in ["[1,2]", "null", "42", "\"org\""] {
        let catalog = dynamic(&db, Some(raw)).await;
        let result = catalog.resolve_members(&db, &directory).await;
        assert!(
            matches!(result, Err(CatalogError::InvalidQueryShape(_))),
            "query {raw}"
        );
    }
}

#[tokio::test]
async fn test_unknown_field_is_malformed() {
    let (db, directory) = setup().await;
    seed_courses(&db).await;

    let catalog = dynamic(&db, Some(r#"{"org": "edX", "password": "x"}"#)).await;
    let result = catalog.resolve_members(&db, &directory).await;

    assert!(matches!(
        result,
        Err(CatalogError::MalformedQuery(QueryFailure::Directory(
            DirectoryError::UnknownField(field)
        ))) if field == "password"
    ));
}

#[tokio::test]
async fn test_operators_are_not_forwarded() {
    let (db, directory) = setup().await;
    seed_courses(&db).await;

    for raw in [
        r#"{"org": {"$ne": "edX"}}"#,
        r#"{"org": ["edX", "MITx"]}"#,
        r#"{"self_paced": "true"}"#,
        r#"{"org__icontains": "ed"}"#,
    ] {
        let catalog = dynamic(&db, Some(raw)).await;
        let result = catalog.resolve_members(&db, &directory).await;
        assert!(
            matches!(result, Err(CatalogError::MalformedQuery(_))),
            "query {raw}"
        );
    }
}

#[tokio::test]
async fn test_query_string_is_replaced() {
    let (db, directory) = setup().await;
    let courses = seed_courses(&db).await;

    let catalog = dynamic(&db, None).await;
    let updated = CatalogService::set_query_string(
        &db,
        catalog.id(),
        Some(r#"{"org": "MITx"}"#.to_string()),
    )
    .await
    .unwrap();
    assert!(updated.base.modified >= catalog.base().modified);

    let members = CatalogService::resolve_members(&db, &directory, &catalog.id().into())
        .await
        .unwrap();
    assert_eq!(members.course_keys(), vec![courses[2].id.clone()]);
}
