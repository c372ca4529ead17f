use database::directory::DatabaseCourseDirectory;
use sea_orm::DatabaseConnection;

/// Shared by every handler; the directory reads through the same pool
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub directory: DatabaseCourseDirectory,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let directory = DatabaseCourseDirectory::new(db.clone());
        Self { db, directory }
    }
}
