use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error(
        "\"{0}\" is not a valid slug: use letters, numbers, underscores or hyphens"
    )]
    Invalid(String),
    #[error("\"{0}\" is not a valid slug: it would be read as a catalog id")]
    LooksLikeId(String),
}

/// Normalizes a user supplied slug: blank slugs become `None`, anything else
/// must consist of ASCII letters, digits, underscores and hyphens and must not
/// parse as a UUID, since lookups treat those as ids.
pub fn normalize_slug(slug: Option<&str>) -> Result<Option<String>, SlugError> {
    let Some(slug) = slug.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SlugError::Invalid(slug.to_string()));
    }

    if Uuid::parse_str(slug).is_ok() {
        return Err(SlugError::LooksLikeId(slug.to_string()));
    }

    Ok(Some(slug.to_string()))
}
