use crate::{
    directory::CourseDirectory,
    entities::{available_course, course_overview},
    error::CatalogError,
    services::catalog::icontains,
};
use log::{info, warn};
use models::{
    course_key::CourseKey,
    ordering::{AvailableCourseOrderField, AvailableCourseOrdering},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, sea_query::JoinType,
};

/// Listing filters for the registry
#[derive(Debug, Clone, Default)]
pub struct AvailableCourseFilter {
    /// Exact course key
    pub course_id: Option<String>,
    pub active: Option<bool>,
    /// Case-insensitive substring of the course display name
    pub search: Option<String>,
}

pub struct AvailableCourseService;

impl AvailableCourseService {
    /// Register a course run as available.
    ///
    /// An existing entry for the course is returned untouched, so repeated
    /// calls never change `active`.
    pub async fn create<C, D>(
        db: &C,
        directory: &D,
        course: &CourseKey,
        active: bool,
    ) -> Result<available_course::Model, CatalogError>
    where
        C: ConnectionTrait,
        D: CourseDirectory,
    {
        if let Some(existing) = Self::find(db, course).await? {
            return Ok(existing);
        }

        let known = directory
            .lookup_by_id(course)
            .await
            .map_err(CatalogError::lookup_failed)?;
        if known.is_none() {
            warn!("Cannot create AvailableCourse. Course with ID \"{course}\" does not exist.");
            return Err(CatalogError::CourseNotFound(course.to_string()));
        }

        let created = available_course::ActiveModel {
            course_id: Set(course.to_string()),
            active: Set(active),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created new AvailableCourse. Course ID: {course}, Active: {active}");
        Ok(created)
    }

    /// The registry entry for a course, if any; the oldest wins when a course
    /// was registered more than once
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        course: &CourseKey,
    ) -> Result<Option<available_course::Model>, DbErr> {
        available_course::Entity::find()
            .filter(available_course::Column::CourseId.eq(course.to_string()))
            .order_by_asc(available_course::Column::Id)
            .one(db)
            .await
    }

    pub async fn get<C: ConnectionTrait>(
        db: &C,
        course: &CourseKey,
    ) -> Result<available_course::Model, CatalogError> {
        Self::find(db, course).await?.ok_or_else(|| {
            warn!("AvailableCourse with course ID \"{course}\" does not exist.");
            CatalogError::CourseNotFound(course.to_string())
        })
    }

    /// Toggle availability, writing only when the flag actually changes
    pub async fn set_active<C: ConnectionTrait>(
        db: &C,
        course: &CourseKey,
        active: bool,
    ) -> Result<available_course::Model, CatalogError> {
        let existing = Self::get(db, course).await?;

        if existing.active == active {
            return Ok(existing);
        }

        let mut model: available_course::ActiveModel = existing.into();
        model.active = Set(active);
        let updated = model.update(db).await?;

        info!("Updated AvailableCourse active status. Course ID: {course}, Active: {active}");
        Ok(updated)
    }

    /// Remove a course from the registry; reports whether anything was removed
    pub async fn delete<C: ConnectionTrait>(db: &C, course: &CourseKey) -> Result<bool, DbErr> {
        let Some(existing) = Self::find(db, course).await? else {
            warn!("AvailableCourse with course ID \"{course}\" does not exist.");
            return Ok(false);
        };

        available_course::Entity::delete_by_id(existing.id)
            .exec(db)
            .await?;

        info!("AvailableCourse deleted successfully. Course ID: {course}");
        Ok(true)
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &AvailableCourseFilter,
        ordering: AvailableCourseOrdering,
    ) -> Result<Vec<available_course::Model>, DbErr> {
        let mut condition = Condition::all();

        if let Some(course_id) = &filter.course_id {
            condition = condition.add(available_course::Column::CourseId.eq(course_id.as_str()));
        }

        if let Some(active) = filter.active {
            condition = condition.add(available_course::Column::Active.eq(active));
        }

        let mut query = available_course::Entity::find();

        if let Some(search) = &filter.search {
            query = query.join(
                JoinType::InnerJoin,
                available_course::Relation::CourseOverview.def(),
            );
            condition = condition.add(icontains(course_overview::Column::DisplayName, search));
        }

        let column = match ordering.field {
            AvailableCourseOrderField::Id => available_course::Column::Id,
            AvailableCourseOrderField::Course => available_course::Column::CourseId,
            AvailableCourseOrderField::Active => available_course::Column::Active,
        };

        let query = query.filter(condition);
        let query = if ordering.descending {
            query.order_by_desc(column)
        } else {
            query.order_by_asc(column)
        };

        query.order_by_asc(available_course::Column::Id).all(db).await
    }
}
