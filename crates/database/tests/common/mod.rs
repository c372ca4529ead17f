#![allow(dead_code)]

use chrono::Utc;
use database::{
    directory::DatabaseCourseDirectory,
    entities::{available_course, course_overview},
};
use migration::{Migrator, MigratorTrait};
use models::course_key::CourseKey;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection,
};

/// In-memory database with every migration applied.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn setup() -> (DatabaseConnection, DatabaseCourseDirectory) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let directory = DatabaseCourseDirectory::new(db.clone());
    (db, directory)
}

pub fn key(raw: &str) -> CourseKey {
    raw.parse().unwrap()
}

pub async fn seed_course(
    db: &DatabaseConnection,
    id: &str,
    display_name: &str,
    self_paced: bool,
) -> course_overview::Model {
    let course_key = key(id);
    let now = Utc::now().naive_utc();

    course_overview::ActiveModel {
        id: Set(id.to_string()),
        org: Set(course_key.org().to_string()),
        number: Set(course_key.number().to_string()),
        run: Set(course_key.run().to_string()),
        display_name: Set(display_name.to_string()),
        language: Set(None),
        catalog_visibility: Set("both".to_string()),
        self_paced: Set(self_paced),
        invitation_only: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

/// Seeds three course runs across two organizations
pub async fn seed_courses(db: &DatabaseConnection) -> Vec<course_overview::Model> {
    vec![
        seed_course(db, "course-v1:edX+DemoX+2024_T1", "Demo Course", true).await,
        seed_course(db, "course-v1:edX+Rust101+2024_T2", "Intro to Rust", false).await,
        seed_course(db, "course-v1:MITx+6.002x+2024_T1", "Circuits", true).await,
    ]
}

pub async fn seed_available(
    db: &DatabaseConnection,
    course_id: &str,
    active: bool,
) -> available_course::Model {
    available_course::ActiveModel {
        course_id: Set(course_id.to_string()),
        active: Set(active),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
