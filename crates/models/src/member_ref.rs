use crate::course_key::CourseKey;
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A reference to a prospective catalog member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberRef {
    /// A course run in the course directory
    CourseRun(CourseKey),
    /// A row of the available course registry
    AvailableCourse(i32),
}

impl MemberRef {
    /// Interprets a JSON value as a member reference.
    ///
    /// Integers (or strings of digits) address available courses, strings
    /// that parse as course keys address course runs.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .and_then(|id| i32::try_from(id).ok())
                .map(Self::AvailableCourse),
            Value::String(s) => {
                if let Ok(key) = s.parse::<CourseKey>() {
                    Some(Self::CourseRun(key))
                } else {
                    s.parse::<i32>().ok().map(Self::AvailableCourse)
                }
            }
            _ => None,
        }
    }

    /// Parses every value, returning the references alongside the textual form
    /// of the values that could not be interpreted.
    pub fn parse_all(values: &[Value]) -> (Vec<Self>, Vec<String>) {
        let mut refs = Vec::with_capacity(values.len());
        let mut invalid = Vec::new();

        for value in values {
            match Self::from_value(value) {
                Some(member) => refs.push(member),
                None => invalid.push(value.to_string()),
            }
        }

        (refs, invalid)
    }

    pub fn as_course_run(&self) -> Option<&CourseKey> {
        match self {
            Self::CourseRun(key) => Some(key),
            Self::AvailableCourse(_) => None,
        }
    }

    pub fn as_available_course(&self) -> Option<i32> {
        match self {
            Self::AvailableCourse(id) => Some(*id),
            Self::CourseRun(_) => None,
        }
    }
}

impl Display for MemberRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::CourseRun(key) => write!(f, "{key}"),
            Self::AvailableCourse(id) => write!(f, "{id}"),
        }
    }
}
