//! The catalog variants and how each one resolves its members.

use crate::{
    directory::{CourseDirectory, CourseRecord},
    entities::{available_course, course_overview, dynamic_catalog, flexible_catalog},
    error::{CatalogError, QueryFailure},
};
use flexible_catalog::CatalogKind;
use models::query::CourseQuery;
use sea_orm::{ConnectionTrait, DbErr, ModelTrait, QueryOrder, prelude::Uuid};

/// A catalog listing an explicit set of course runs
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCatalog {
    pub base: flexible_catalog::Model,
}

/// A catalog listing entries of the available course registry
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCourses {
    pub base: flexible_catalog::Model,
}

/// A catalog whose members are recomputed from a stored filter on every read
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicCatalog {
    pub base: flexible_catalog::Model,
    pub query_string: Option<String>,
}

/// A catalog rehydrated as its concrete variant
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    Fixed(FixedCatalog),
    Courses(CatalogCourses),
    Dynamic(DynamicCatalog),
}

/// The resolved members of a catalog
#[derive(Debug, Clone, PartialEq)]
pub enum Members {
    CourseRuns(Vec<CourseRecord>),
    AvailableCourses(Vec<available_course::Model>),
}

impl Members {
    /// The course keys of every member, in resolution order
    pub fn course_keys(&self) -> Vec<String> {
        match self {
            Self::CourseRuns(courses) => courses.iter().map(|c| c.id.clone()).collect(),
            Self::AvailableCourses(courses) => {
                courses.iter().map(|c| c.course_id.clone()).collect()
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::CourseRuns(courses) => courses.len(),
            Self::AvailableCourses(courses) => courses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FixedCatalog {
    pub async fn course_runs<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<CourseRecord>, DbErr> {
        self.base
            .find_related(course_overview::Entity)
            .order_by_asc(course_overview::Column::Id)
            .all(db)
            .await
    }

    /// Every referenced course run, whatever its state
    pub async fn resolve_members<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Members, CatalogError> {
        Ok(Members::CourseRuns(self.course_runs(db).await?))
    }
}

impl CatalogCourses {
    pub async fn courses<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<available_course::Model>, DbErr> {
        self.base
            .find_related(available_course::Entity)
            .order_by_asc(available_course::Column::Id)
            .all(db)
            .await
    }

    /// Every referenced registry entry, active or not
    pub async fn resolve_members<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Members, CatalogError> {
        Ok(Members::AvailableCourses(self.courses(db).await?))
    }
}

impl DynamicCatalog {
    /// Applies the stored query to the course directory.
    ///
    /// A blank query resolves to nothing. Invalid JSON and filters the
    /// directory refuses are reported as `MalformedQuery`, JSON that is not an
    /// object as `InvalidQueryShape`.
    pub async fn resolve_members<D: CourseDirectory>(
        &self,
        directory: &D,
    ) -> Result<Members, CatalogError> {
        let Some(query) = CourseQuery::parse(self.query_string.as_deref())? else {
            return Ok(Members::CourseRuns(vec![]));
        };

        let courses = directory
            .filter(&query)
            .await
            .map_err(|err| CatalogError::MalformedQuery(QueryFailure::Directory(err)))?;

        Ok(Members::CourseRuns(courses))
    }
}

impl Catalog {
    /// Builds the variant named by the base record's discriminant
    pub fn from_parts(
        base: flexible_catalog::Model,
        dynamic: Option<dynamic_catalog::Model>,
    ) -> Self {
        match base.kind {
            CatalogKind::Fixed => Self::Fixed(FixedCatalog { base }),
            CatalogKind::CatalogCourses => Self::Courses(CatalogCourses { base }),
            CatalogKind::Dynamic => Self::Dynamic(DynamicCatalog {
                base,
                query_string: dynamic.and_then(|d| d.query_string),
            }),
        }
    }

    pub fn base(&self) -> &flexible_catalog::Model {
        match self {
            Self::Fixed(catalog) => &catalog.base,
            Self::Courses(catalog) => &catalog.base,
            Self::Dynamic(catalog) => &catalog.base,
        }
    }

    pub fn id(&self) -> Uuid {
        self.base().id
    }

    pub fn kind(&self) -> CatalogKind {
        self.base().kind
    }

    pub async fn resolve_members<C, D>(
        &self,
        db: &C,
        directory: &D,
    ) -> Result<Members, CatalogError>
    where
        C: ConnectionTrait,
        D: CourseDirectory,
    {
        match self {
            Self::Fixed(catalog) => catalog.resolve_members(db).await,
            Self::Courses(catalog) => catalog.resolve_members(db).await,
            Self::Dynamic(catalog) => catalog.resolve_members(directory).await,
        }
    }
}

impl From<FixedCatalog> for Catalog {
    fn from(catalog: FixedCatalog) -> Self {
        Self::Fixed(catalog)
    }
}

impl From<CatalogCourses> for Catalog {
    fn from(catalog: CatalogCourses) -> Self {
        Self::Courses(catalog)
    }
}

impl From<DynamicCatalog> for Catalog {
    fn from(catalog: DynamicCatalog) -> Self {
        Self::Dynamic(catalog)
    }
}
