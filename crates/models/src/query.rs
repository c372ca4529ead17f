use serde_json::{Map, Value};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query string is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("query string must be a JSON object, got {0}")]
    InvalidShape(&'static str),
}

/// A parsed dynamic catalog query: a flat set of equality predicates that are
/// conjoined when applied.
///
/// Keys are not checked here; the course directory decides which fields it
/// allows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseQuery {
    predicates: Map<String, Value>,
}

impl CourseQuery {
    /// Parses a stored query string.
    ///
    /// Returns `Ok(None)` for an absent or blank string, which resolves to no
    /// courses at all.
    pub fn parse(query_string: Option<&str>) -> Result<Option<Self>, QueryError> {
        let Some(raw) = query_string.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(raw)? {
            Value::Object(predicates) => Ok(Some(Self { predicates })),
            other => Err(QueryError::InvalidShape(json_type_name(&other))),
        }
    }

    pub fn from_predicates(predicates: Map<String, Value>) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.predicates.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    NullableText,
    Bool,
}

/// A typed equality operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Null,
}

/// Course fields a dynamic query may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CourseField {
    Id,
    Org,
    Number,
    Run,
    DisplayName,
    Language,
    CatalogVisibility,
    SelfPaced,
    InvitationOnly,
}

impl CourseField {
    pub fn kind(self) -> FieldKind {
        match self {
            Self::SelfPaced | Self::InvitationOnly => FieldKind::Bool,
            Self::Language => FieldKind::NullableText,
            _ => FieldKind::Text,
        }
    }

    pub fn all() -> Vec<CourseField> {
        CourseField::iter().collect()
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// Checks that `value` is a scalar this field can be compared against
    pub fn operand(self, value: &Value) -> Option<FieldValue> {
        match (self.kind(), value) {
            (FieldKind::Text | FieldKind::NullableText, Value::String(s)) => {
                Some(FieldValue::Text(s.clone()))
            }
            (FieldKind::NullableText, Value::Null) => Some(FieldValue::Null),
            (FieldKind::Bool, Value::Bool(b)) => Some(FieldValue::Bool(*b)),
            _ => None,
        }
    }
}
