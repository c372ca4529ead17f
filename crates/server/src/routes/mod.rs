pub mod available_course;
pub mod catalog_courses;
pub mod dynamic_catalog;
pub mod fixed_catalog;
pub mod flexible_catalog;
pub mod health;

use crate::{
    dtos::catalog::{CatalogResponse, CatalogSummary},
    error::ApiError,
};
use database::{
    catalog::Catalog,
    entities::flexible_catalog as base,
    error::CatalogError,
    services::catalog::CatalogService,
};
use models::{member_ref::MemberRef, ordering::Ordering};
use sea_orm::ConnectionTrait;
use serde_json::Value;
use std::str::FromStr;

/// Parses an `ordering` query parameter, falling back to `default`
pub(crate) fn ordering<F>(raw: Option<&str>, default: Ordering<F>) -> Result<Ordering<F>, ApiError>
where
    F: FromStr,
{
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}

/// Reads member references from a request body; any value that is neither a
/// course key nor an id rejects the whole request
pub(crate) fn member_refs(values: &[Value]) -> Result<Vec<MemberRef>, ApiError> {
    let (refs, invalid) = MemberRef::parse_all(values);

    if !invalid.is_empty() {
        return Err(CatalogError::InvalidReference(invalid).into());
    }

    Ok(refs)
}

/// Renders a catalog with the fields of its variant
pub(crate) async fn catalog_response<C: ConnectionTrait>(
    db: &C,
    catalog: Catalog,
) -> Result<CatalogResponse, ApiError> {
    let response = match catalog {
        Catalog::Fixed(fixed) => {
            let course_runs = fixed.course_runs(db).await?;
            CatalogResponse {
                course_runs: Some(course_runs.into_iter().map(|c| c.id).collect()),
                ..CatalogResponse::from(CatalogSummary::from(fixed.base))
            }
        }
        Catalog::Courses(courses) => {
            let members = courses.courses(db).await?;
            CatalogResponse {
                courses: Some(members.into_iter().map(|c| c.id).collect()),
                ..CatalogResponse::from(CatalogSummary::from(courses.base))
            }
        }
        Catalog::Dynamic(dynamic) => CatalogResponse {
            query_string: dynamic.query_string,
            ..CatalogResponse::from(CatalogSummary::from(dynamic.base))
        },
    };

    Ok(response)
}

/// Renders listed base records as their full variants
pub(crate) async fn catalog_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<base::Model>,
) -> Result<Vec<CatalogResponse>, ApiError> {
    let mut responses = Vec::with_capacity(models.len());

    for model in models {
        let catalog = CatalogService::get(db, &model.id.into()).await?;
        responses.push(catalog_response(db, catalog).await?);
    }

    Ok(responses)
}
