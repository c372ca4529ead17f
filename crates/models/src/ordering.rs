use std::str::FromStr;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot order by \"{0}\"")]
pub struct OrderingError(pub String);

/// A listing order such as `name` or `-created` (descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering<F> {
    pub field: F,
    pub descending: bool,
}

impl<F> Ordering<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl<F: FromStr> FromStr for Ordering<F> {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let field = name.parse().map_err(|_| OrderingError(s.to_string()))?;

        Ok(Self { field, descending })
    }
}

/// Columns catalogs can be listed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CatalogOrderField {
    Id,
    Name,
    Slug,
    Created,
    Modified,
}

/// Columns the available course registry can be listed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AvailableCourseOrderField {
    Id,
    Course,
    Active,
}

pub type CatalogOrdering = Ordering<CatalogOrderField>;
pub type AvailableCourseOrdering = Ordering<AvailableCourseOrderField>;

impl Default for CatalogOrdering {
    fn default() -> Self {
        Self::asc(CatalogOrderField::Name)
    }
}

impl Default for AvailableCourseOrdering {
    fn default() -> Self {
        Self::asc(AvailableCourseOrderField::Id)
    }
}
