use crate::{
    catalog::{Catalog, CatalogCourses, FixedCatalog},
    directory::CourseDirectory,
    entities::{available_course, catalog_courses_member, fixed_catalog_course_run},
    error::CatalogError,
    services::catalog::CatalogService,
};
use log::{debug, info, warn};
use models::{course_key::CourseKey, member_ref::MemberRef};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait, prelude::Uuid,
};
use std::collections::BTreeSet;

/// The catalog whose membership changes, named together with its variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipTarget {
    /// Members are course runs
    Fixed(Uuid),
    /// Members are available course registry entries
    CatalogCourses(Uuid),
}

impl MembershipTarget {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Fixed(id) | Self::CatalogCourses(id) => *id,
        }
    }
}

/// References checked against the target variant
enum Refs {
    CourseRuns(BTreeSet<CourseKey>),
    AvailableCourses(BTreeSet<i32>),
}

pub struct MembershipService;

impl MembershipService {
    /// Attach members to a fixed or catalog-courses catalog.
    ///
    /// Ineligible references (inactive or unknown registry entries, course
    /// runs the directory does not know) are dropped; when nothing eligible
    /// remains the call fails with `NoEligibleMembers`. Members already
    /// present are left alone.
    pub async fn add_members<D: CourseDirectory>(
        db: &DatabaseConnection,
        directory: &D,
        target: MembershipTarget,
        refs: &[MemberRef],
    ) -> Result<Catalog, CatalogError> {
        match Self::check_refs(target, refs)? {
            Refs::CourseRuns(keys) => {
                let catalog = Self::add_course_runs(db, directory, target.id(), keys).await?;
                Ok(Catalog::Fixed(catalog))
            }
            Refs::AvailableCourses(ids) => {
                let catalog = Self::add_available_courses(db, target.id(), ids).await?;
                Ok(Catalog::Courses(catalog))
            }
        }
    }

    /// Detach members from a fixed or catalog-courses catalog; references that
    /// are not attached are ignored
    pub async fn remove_members(
        db: &DatabaseConnection,
        target: MembershipTarget,
        refs: &[MemberRef],
    ) -> Result<Catalog, CatalogError> {
        let refs = Self::check_refs(target, refs)?;

        let txn = db.begin().await?;

        let catalog = match refs {
            Refs::CourseRuns(keys) => {
                let catalog = CatalogService::get_fixed(&txn, target.id()).await?;
                let removed = fixed_catalog_course_run::Entity::delete_many()
                    .filter(fixed_catalog_course_run::Column::CatalogId.eq(catalog.base.id))
                    .filter(
                        fixed_catalog_course_run::Column::CourseId
                            .is_in(keys.iter().map(ToString::to_string)),
                    )
                    .exec(&txn)
                    .await?;
                debug!("Removed {} course runs", removed.rows_affected);

                let base = CatalogService::touch(&txn, catalog.base).await?;
                Catalog::Fixed(FixedCatalog { base })
            }
            Refs::AvailableCourses(ids) => {
                let catalog = CatalogService::get_catalog_courses(&txn, target.id()).await?;
                let removed = catalog_courses_member::Entity::delete_many()
                    .filter(catalog_courses_member::Column::CatalogId.eq(catalog.base.id))
                    .filter(catalog_courses_member::Column::AvailableCourseId.is_in(ids))
                    .exec(&txn)
                    .await?;
                debug!("Removed {} available courses", removed.rows_affected);

                let base = CatalogService::touch(&txn, catalog.base).await?;
                Catalog::Courses(CatalogCourses { base })
            }
        };

        txn.commit().await?;
        info!("Removed members from catalog {}", catalog.id());

        Ok(catalog)
    }

    /// Every reference must match the target variant, and there must be at
    /// least one
    fn check_refs(target: MembershipTarget, refs: &[MemberRef]) -> Result<Refs, CatalogError> {
        let invalid: Vec<String> = refs
            .iter()
            .filter(|member| match target {
                MembershipTarget::Fixed(_) => member.as_course_run().is_none(),
                MembershipTarget::CatalogCourses(_) => member.as_available_course().is_none(),
            })
            .map(ToString::to_string)
            .collect();

        if !invalid.is_empty() {
            warn!("Rejected member references for catalog {}: {invalid:?}", target.id());
            return Err(CatalogError::InvalidReference(invalid));
        }

        if refs.is_empty() {
            warn!("No member references were provided for catalog {}", target.id());
            return Err(CatalogError::EmptyInput);
        }

        Ok(match target {
            MembershipTarget::Fixed(_) => Refs::CourseRuns(
                refs.iter()
                    .filter_map(MemberRef::as_course_run)
                    .cloned()
                    .collect(),
            ),
            MembershipTarget::CatalogCourses(_) => Refs::AvailableCourses(
                refs.iter()
                    .filter_map(MemberRef::as_available_course)
                    .collect(),
            ),
        })
    }

    async fn add_course_runs<D: CourseDirectory>(
        db: &DatabaseConnection,
        directory: &D,
        id: Uuid,
        keys: BTreeSet<CourseKey>,
    ) -> Result<FixedCatalog, CatalogError> {
        CatalogService::get_fixed(db, id).await?;

        // Resolve before opening the transaction; the directory may share the pool
        let mut eligible = Vec::with_capacity(keys.len());
        for key in &keys {
            match directory
                .lookup_by_id(key)
                .await
                .map_err(CatalogError::lookup_failed)?
            {
                Some(course) => eligible.push(course.id),
                None => debug!("Dropping unknown course run {key}"),
            }
        }

        if eligible.is_empty() {
            warn!("No valid courses found for IDs: {keys:?}");
            return Err(CatalogError::NoEligibleMembers);
        }

        let txn = db.begin().await?;
        let catalog = CatalogService::get_fixed(&txn, id).await?;

        let present: Vec<String> = fixed_catalog_course_run::Entity::find()
            .select_only()
            .column(fixed_catalog_course_run::Column::CourseId)
            .filter(fixed_catalog_course_run::Column::CatalogId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let new_rows: Vec<_> = eligible
            .into_iter()
            .filter(|course_id| !present.contains(course_id))
            .map(|course_id| fixed_catalog_course_run::ActiveModel {
                id: Set(Uuid::new_v4()),
                catalog_id: Set(id),
                course_id: Set(course_id),
            })
            .collect();

        if !new_rows.is_empty() {
            fixed_catalog_course_run::Entity::insert_many(new_rows)
                .exec(&txn)
                .await?;
        }

        let base = CatalogService::touch(&txn, catalog.base).await?;
        txn.commit().await?;

        info!("Added course runs to fixed catalog {id}");
        Ok(FixedCatalog { base })
    }

    async fn add_available_courses(
        db: &DatabaseConnection,
        id: Uuid,
        ids: BTreeSet<i32>,
    ) -> Result<CatalogCourses, CatalogError> {
        let txn = db.begin().await?;
        let catalog = CatalogService::get_catalog_courses(&txn, id).await?;

        let eligible: Vec<i32> = available_course::Entity::find()
            .select_only()
            .column(available_course::Column::Id)
            .filter(available_course::Column::Id.is_in(ids.iter().copied()))
            .filter(available_course::Column::Active.eq(true))
            .into_tuple()
            .all(&txn)
            .await?;

        let dropped: Vec<&i32> = ids.iter().filter(|id| !eligible.contains(id)).collect();
        if !dropped.is_empty() {
            debug!("Dropping inactive or unknown available courses {dropped:?}");
        }

        if eligible.is_empty() {
            warn!("No active courses found for IDs: {ids:?}");
            return Err(CatalogError::NoEligibleMembers);
        }

        let present: Vec<i32> = catalog_courses_member::Entity::find()
            .select_only()
            .column(catalog_courses_member::Column::AvailableCourseId)
            .filter(catalog_courses_member::Column::CatalogId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let new_rows: Vec<_> = eligible
            .into_iter()
            .filter(|course| !present.contains(course))
            .map(|course| catalog_courses_member::ActiveModel {
                id: Set(Uuid::new_v4()),
                catalog_id: Set(id),
                available_course_id: Set(course),
            })
            .collect();

        if !new_rows.is_empty() {
            catalog_courses_member::Entity::insert_many(new_rows)
                .exec(&txn)
                .await?;
        }

        let base = CatalogService::touch(&txn, catalog.base).await?;
        txn.commit().await?;

        info!("Added available courses to catalog {id}");
        Ok(CatalogCourses { base })
    }
}
