use crate::entities::course_overview;
use models::{
    course_key::CourseKey,
    query::{CourseField, CourseQuery, FieldValue},
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use std::future::Future;
use thiserror::Error;

/// A course run record as returned by the course directory
pub type CourseRecord = course_overview::Model;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("\"{0}\" is not a filterable course field")]
    UnknownField(String),

    #[error("cannot compare course field \"{field}\" with {value}")]
    InvalidValue { field: String, value: String },

    #[error("course directory unavailable: {0}")]
    Store(#[from] DbErr),
}

/// The system of record for course runs.
///
/// Catalogs only reference course runs; every read of course data goes through
/// an implementation of this trait handed to the service that needs it.
pub trait CourseDirectory: Send + Sync {
    /// Looks up a single course run
    fn lookup_by_id(
        &self,
        key: &CourseKey,
    ) -> impl Future<Output = Result<Option<CourseRecord>, DirectoryError>> + Send;

    /// Returns every course run matching all predicates of `query`, ordered by
    /// course key
    fn filter(
        &self,
        query: &CourseQuery,
    ) -> impl Future<Output = Result<Vec<CourseRecord>, DirectoryError>> + Send;
}

/// Course directory backed by the `course_overviews` table
#[derive(Debug, Clone)]
pub struct DatabaseCourseDirectory {
    db: DatabaseConnection,
}

impl DatabaseCourseDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn column(field: CourseField) -> course_overview::Column {
        match field {
            CourseField::Id => course_overview::Column::Id,
            CourseField::Org => course_overview::Column::Org,
            CourseField::Number => course_overview::Column::Number,
            CourseField::Run => course_overview::Column::Run,
            CourseField::DisplayName => course_overview::Column::DisplayName,
            CourseField::Language => course_overview::Column::Language,
            CourseField::CatalogVisibility => course_overview::Column::CatalogVisibility,
            CourseField::SelfPaced => course_overview::Column::SelfPaced,
            CourseField::InvitationOnly => course_overview::Column::InvitationOnly,
        }
    }

    /// Translates the query into a conjunction of equality checks, rejecting
    /// anything outside the allow-list
    fn condition(query: &CourseQuery) -> Result<Condition, DirectoryError> {
        let mut condition = Condition::all();

        for (name, value) in query.predicates() {
            let field = CourseField::lookup(name)
                .ok_or_else(|| DirectoryError::UnknownField(name.to_string()))?;
            let operand = field
                .operand(value)
                .ok_or_else(|| DirectoryError::InvalidValue {
                    field: name.to_string(),
                    value: value.to_string(),
                })?;

            let column = Self::column(field);
            condition = condition.add(match operand {
                FieldValue::Text(text) => column.eq(text),
                FieldValue::Bool(flag) => column.eq(flag),
                FieldValue::Null => column.is_null(),
            });
        }

        Ok(condition)
    }
}

impl CourseDirectory for DatabaseCourseDirectory {
    async fn lookup_by_id(&self, key: &CourseKey) -> Result<Option<CourseRecord>, DirectoryError> {
        let course = course_overview::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?;

        Ok(course)
    }

    async fn filter(&self, query: &CourseQuery) -> Result<Vec<CourseRecord>, DirectoryError> {
        let condition = Self::condition(query)?;

        let courses = course_overview::Entity::find()
            .filter(condition)
            .order_by_asc(course_overview::Column::Id)
            .all(&self.db)
            .await?;

        Ok(courses)
    }
}
