use crate::{
    catalog::{Catalog, CatalogCourses, DynamicCatalog, FixedCatalog, Members},
    directory::CourseDirectory,
    entities::{
        available_course, catalog_courses_member, dynamic_catalog, fixed_catalog_course_run,
        flexible_catalog::{self, CatalogKind},
    },
    error::CatalogError,
};
use chrono::{NaiveDateTime, Utc};
use log::{info, warn};
use models::{
    course_key::CourseKey,
    ordering::{CatalogOrderField, CatalogOrdering},
    slug::normalize_slug,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, SqlErr, TransactionTrait,
    prelude::{Expr, Uuid},
    sea_query::{Func, LikeExpr, SimpleExpr},
};
use std::{fmt::Display, str::FromStr};

/// Addresses a catalog by id or by slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLookup {
    Id(Uuid),
    Slug(String),
}

impl From<&str> for CatalogLookup {
    /// A UUID addresses by id, anything else by slug
    fn from(s: &str) -> Self {
        match Uuid::parse_str(s) {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Slug(s.to_string()),
        }
    }
}

impl FromStr for CatalogLookup {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Display for CatalogLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => write!(f, "{slug}"),
        }
    }
}

impl From<Uuid> for CatalogLookup {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewCatalog {
    pub name: String,
    pub slug: Option<String>,
}

/// Fields to change on an existing catalog; `None` leaves a field untouched and
/// a blank slug clears it
#[derive(Debug, Clone, Default)]
pub struct CatalogChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl CatalogChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none()
    }
}

/// Listing filters; every filter that is set must match
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub kind: Option<CatalogKind>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the slug
    pub slug: Option<String>,
    /// Case-insensitive substring of either name or slug
    pub search: Option<String>,
    pub created_after: Option<NaiveDateTime>,
    pub created_before: Option<NaiveDateTime>,
    /// Catalogs containing this available course
    pub available_course_id: Option<i32>,
    /// Catalogs containing this course run
    pub course_run: Option<String>,
}

pub struct CatalogService;

impl CatalogService {
    /// List catalogs as their base records
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        filter: &CatalogFilter,
        ordering: CatalogOrdering,
    ) -> Result<Vec<flexible_catalog::Model>, DbErr> {
        let mut condition = Condition::all();

        if let Some(kind) = filter.kind {
            condition = condition.add(flexible_catalog::Column::Kind.eq(kind));
        }

        if let Some(name) = &filter.name {
            condition = condition.add(icontains(flexible_catalog::Column::Name, name));
        }

        if let Some(slug) = &filter.slug {
            condition = condition.add(icontains(flexible_catalog::Column::Slug, slug));
        }

        if let Some(search) = &filter.search {
            condition = condition.add(
                Condition::any()
                    .add(icontains(flexible_catalog::Column::Name, search))
                    .add(icontains(flexible_catalog::Column::Slug, search)),
            );
        }

        if let Some(after) = filter.created_after {
            condition = condition.add(flexible_catalog::Column::Created.gte(after));
        }

        if let Some(before) = filter.created_before {
            condition = condition.add(flexible_catalog::Column::Created.lte(before));
        }

        if let Some(available_course_id) = filter.available_course_id {
            condition = condition.add(
                flexible_catalog::Column::Id.in_subquery(
                    catalog_courses_member::Entity::find()
                        .select_only()
                        .column(catalog_courses_member::Column::CatalogId)
                        .filter(
                            catalog_courses_member::Column::AvailableCourseId
                                .eq(available_course_id),
                        )
                        .into_query(),
                ),
            );
        }

        if let Some(course_run) = &filter.course_run {
            condition = condition.add(
                flexible_catalog::Column::Id.in_subquery(
                    fixed_catalog_course_run::Entity::find()
                        .select_only()
                        .column(fixed_catalog_course_run::Column::CatalogId)
                        .filter(fixed_catalog_course_run::Column::CourseId.eq(course_run.as_str()))
                        .into_query(),
                ),
            );
        }

        let column = match ordering.field {
            CatalogOrderField::Id => flexible_catalog::Column::Id,
            CatalogOrderField::Name => flexible_catalog::Column::Name,
            CatalogOrderField::Slug => flexible_catalog::Column::Slug,
            CatalogOrderField::Created => flexible_catalog::Column::Created,
            CatalogOrderField::Modified => flexible_catalog::Column::Modified,
        };

        let query = flexible_catalog::Entity::find().filter(condition);
        let query = if ordering.descending {
            query.order_by_desc(column)
        } else {
            query.order_by_asc(column)
        };

        // Tie-break on id so listings are stable
        query.order_by_asc(flexible_catalog::Column::Id).all(db).await
    }

    /// Fetch a catalog as its concrete variant
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        lookup: &CatalogLookup,
    ) -> Result<Option<Catalog>, DbErr> {
        let query = match lookup {
            CatalogLookup::Id(id) => flexible_catalog::Entity::find_by_id(*id),
            CatalogLookup::Slug(slug) => flexible_catalog::Entity::find()
                .filter(flexible_catalog::Column::Slug.eq(slug.as_str())),
        };

        let Some(base) = query.one(db).await? else {
            return Ok(None);
        };

        let dynamic = match base.kind {
            CatalogKind::Dynamic => base.find_related(dynamic_catalog::Entity).one(db).await?,
            _ => None,
        };

        Ok(Some(Catalog::from_parts(base, dynamic)))
    }

    /// Fetch a catalog as its concrete variant, failing when it does not exist
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        lookup: &CatalogLookup,
    ) -> Result<Catalog, CatalogError> {
        match Self::find(db, lookup).await? {
            Some(catalog) => Ok(catalog),
            None => {
                warn!("Catalog not found: {lookup}");
                Err(CatalogError::CatalogNotFound(lookup.to_string()))
            }
        }
    }

    pub async fn get_fixed<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<FixedCatalog, CatalogError> {
        match Self::get(db, &id.into()).await? {
            Catalog::Fixed(catalog) => Ok(catalog),
            other => Err(Self::wrong_variant(other, CatalogKind::Fixed)),
        }
    }

    pub async fn get_catalog_courses<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<CatalogCourses, CatalogError> {
        match Self::get(db, &id.into()).await? {
            Catalog::Courses(catalog) => Ok(catalog),
            other => Err(Self::wrong_variant(other, CatalogKind::CatalogCourses)),
        }
    }

    pub async fn get_dynamic<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<DynamicCatalog, CatalogError> {
        match Self::get(db, &id.into()).await? {
            Catalog::Dynamic(catalog) => Ok(catalog),
            other => Err(Self::wrong_variant(other, CatalogKind::Dynamic)),
        }
    }

    /// A catalog of another variant is invisible to variant-specific lookups
    fn wrong_variant(catalog: Catalog, expected: CatalogKind) -> CatalogError {
        warn!(
            "Catalog {} is {:?}, not {expected:?}",
            catalog.id(),
            catalog.kind()
        );
        CatalogError::CatalogNotFound(catalog.id().to_string())
    }

    /// Resolve the members of whichever variant `lookup` names
    pub async fn resolve_members<D: CourseDirectory>(
        db: &DatabaseConnection,
        directory: &D,
        lookup: &CatalogLookup,
    ) -> Result<Members, CatalogError> {
        let catalog = Self::get(db, lookup).await?;
        catalog.resolve_members(db, directory).await
    }

    /// Create a fixed catalog with an optional initial set of course runs
    pub async fn create_fixed<D: CourseDirectory>(
        db: &DatabaseConnection,
        directory: &D,
        new: NewCatalog,
        course_runs: &[CourseKey],
    ) -> Result<FixedCatalog, CatalogError> {
        // Resolve before opening the transaction; the directory may share the pool
        let mut course_ids = Vec::with_capacity(course_runs.len());
        for key in course_runs {
            match directory
                .lookup_by_id(key)
                .await
                .map_err(CatalogError::lookup_failed)?
            {
                Some(course) => course_ids.push(course.id),
                None => return Err(CatalogError::CourseNotFound(key.to_string())),
            }
        }
        course_ids.sort();
        course_ids.dedup();

        let txn = db.begin().await?;
        let base = Self::insert_base(&txn, CatalogKind::Fixed, new).await?;

        if !course_ids.is_empty() {
            fixed_catalog_course_run::Entity::insert_many(course_ids.into_iter().map(
                |course_id| fixed_catalog_course_run::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    catalog_id: Set(base.id),
                    course_id: Set(course_id),
                },
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created fixed catalog {} ({})", base.id, base.name);

        Ok(FixedCatalog { base })
    }

    /// Create a catalog of registry entries; every id must exist
    pub async fn create_catalog_courses(
        db: &DatabaseConnection,
        new: NewCatalog,
        available_course_ids: &[i32],
    ) -> Result<CatalogCourses, CatalogError> {
        let mut ids = available_course_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let txn = db.begin().await?;

        if !ids.is_empty() {
            let found: Vec<i32> = available_course::Entity::find()
                .select_only()
                .column(available_course::Column::Id)
                .filter(available_course::Column::Id.is_in(ids.clone()))
                .into_tuple()
                .all(&txn)
                .await?;

            let missing: Vec<String> = ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(CatalogError::InvalidReference(missing));
            }
        }

        let base = Self::insert_base(&txn, CatalogKind::CatalogCourses, new).await?;

        if !ids.is_empty() {
            catalog_courses_member::Entity::insert_many(ids.into_iter().map(|id| {
                catalog_courses_member::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    catalog_id: Set(base.id),
                    available_course_id: Set(id),
                }
            }))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created catalog courses {} ({})", base.id, base.name);

        Ok(CatalogCourses { base })
    }

    /// Create a dynamic catalog; the query string is stored as given and only
    /// interpreted when members are resolved
    pub async fn create_dynamic(
        db: &DatabaseConnection,
        new: NewCatalog,
        query_string: Option<String>,
    ) -> Result<DynamicCatalog, CatalogError> {
        let txn = db.begin().await?;
        let base = Self::insert_base(&txn, CatalogKind::Dynamic, new).await?;

        dynamic_catalog::ActiveModel {
            catalog_id: Set(base.id),
            query_string: Set(query_string.clone()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!("Created dynamic catalog {} ({})", base.id, base.name);

        Ok(DynamicCatalog { base, query_string })
    }

    /// Update the name and/or slug of any catalog
    pub async fn update(
        db: &DatabaseConnection,
        lookup: &CatalogLookup,
        changes: CatalogChanges,
    ) -> Result<Catalog, CatalogError> {
        if changes.is_empty() {
            info!("No fields provided for update of catalog {lookup}");
            return Err(CatalogError::EmptyInput);
        }

        let name = changes.name.as_deref().map(validate_name).transpose()?;
        let slug = changes
            .slug
            .as_deref()
            .map(|slug| normalize_slug(Some(slug)))
            .transpose()?;

        let txn = db.begin().await?;
        let catalog = Self::get(&txn, lookup).await?;
        let id = catalog.id();

        if let Some(Some(slug)) = &slug {
            Self::ensure_slug_available(&txn, slug, Some(id)).await?;
        }

        let mut active: flexible_catalog::ActiveModel = catalog.base().clone().into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(slug) = slug {
            active.slug = Set(slug);
        }
        active.modified = Set(now());

        let base = active.update(&txn).await.map_err(map_slug_violation)?;
        txn.commit().await?;

        info!("Updated catalog {id}");

        Ok(match catalog {
            Catalog::Fixed(_) => Catalog::Fixed(FixedCatalog { base }),
            Catalog::Courses(_) => Catalog::Courses(CatalogCourses { base }),
            Catalog::Dynamic(catalog) => Catalog::Dynamic(DynamicCatalog {
                base,
                query_string: catalog.query_string,
            }),
        })
    }

    /// Replace the stored query of a dynamic catalog
    pub async fn set_query_string(
        db: &DatabaseConnection,
        id: Uuid,
        query_string: Option<String>,
    ) -> Result<DynamicCatalog, CatalogError> {
        let txn = db.begin().await?;
        let catalog = Self::get_dynamic(&txn, id).await?;

        let extension = dynamic_catalog::ActiveModel {
            catalog_id: Set(id),
            query_string: Set(query_string.clone()),
        };
        match catalog.base.find_related(dynamic_catalog::Entity).one(&txn).await? {
            Some(_) => extension.update(&txn).await?,
            None => extension.insert(&txn).await?,
        };

        let base = Self::touch(&txn, catalog.base).await?;
        txn.commit().await?;

        info!("Updated query of dynamic catalog {id}");

        Ok(DynamicCatalog { base, query_string })
    }

    /// Delete a catalog and its variant rows; reports whether anything was removed
    pub async fn delete(db: &DatabaseConnection, lookup: &CatalogLookup) -> Result<bool, DbErr> {
        let txn = db.begin().await?;

        let Some(catalog) = Self::find(&txn, lookup).await? else {
            warn!("Catalog not found for deletion: {lookup}");
            return Ok(false);
        };
        let id = catalog.id();

        match catalog.kind() {
            CatalogKind::Fixed => {
                fixed_catalog_course_run::Entity::delete_many()
                    .filter(fixed_catalog_course_run::Column::CatalogId.eq(id))
                    .exec(&txn)
                    .await?;
            }
            CatalogKind::CatalogCourses => {
                catalog_courses_member::Entity::delete_many()
                    .filter(catalog_courses_member::Column::CatalogId.eq(id))
                    .exec(&txn)
                    .await?;
            }
            CatalogKind::Dynamic => {
                dynamic_catalog::Entity::delete_by_id(id).exec(&txn).await?;
            }
        }

        flexible_catalog::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!("Deleted catalog {id}");
        Ok(true)
    }

    /// Insert the shared base row after validating name and slug
    async fn insert_base<C: ConnectionTrait>(
        db: &C,
        kind: CatalogKind,
        new: NewCatalog,
    ) -> Result<flexible_catalog::Model, CatalogError> {
        let name = validate_name(&new.name)?;
        let slug = normalize_slug(new.slug.as_deref())?;

        if let Some(slug) = &slug {
            Self::ensure_slug_available(db, slug, None).await?;
        }

        let now = now();
        flexible_catalog::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind),
            name: Set(name),
            slug: Set(slug),
            created: Set(now),
            modified: Set(now),
        }
        .insert(db)
        .await
        .map_err(map_slug_violation)
    }

    async fn ensure_slug_available<C: ConnectionTrait>(
        db: &C,
        slug: &str,
        except: Option<Uuid>,
    ) -> Result<(), CatalogError> {
        let mut query =
            flexible_catalog::Entity::find().filter(flexible_catalog::Column::Slug.eq(slug));
        if let Some(id) = except {
            query = query.filter(flexible_catalog::Column::Id.ne(id));
        }

        if query.one(db).await?.is_some() {
            warn!("Slug \"{slug}\" is already in use");
            return Err(CatalogError::DuplicateSlug(slug.to_string()));
        }

        Ok(())
    }

    /// Bump `modified` on a base record
    pub(crate) async fn touch<C: ConnectionTrait>(
        db: &C,
        base: flexible_catalog::Model,
    ) -> Result<flexible_catalog::Model, DbErr> {
        let mut active: flexible_catalog::ActiveModel = base.into();
        active.modified = Set(now());
        active.update(db).await
    }
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn validate_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        Err(CatalogError::InvalidName)
    } else {
        Ok(name.to_string())
    }
}

/// Case-insensitive substring match; `%`, `_` and `\` in the needle are literal
pub(crate) fn icontains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

/// The unique index on slugs backs up the explicit check against races
fn map_slug_violation(err: DbErr) -> CatalogError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => CatalogError::DuplicateSlug(detail),
        _ => CatalogError::Store(err),
    }
}
