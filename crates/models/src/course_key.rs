use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use thiserror::Error;

/// Prefix of the current course key format
const PREFIX: &str = "course-v1:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseKeyError {
    #[error("invalid course key: {0}")]
    Invalid(String),
}

/// Identifier of a course run, e.g. `course-v1:edX+DemoX+2024_T1`.
///
/// The legacy slash-separated form `edX/DemoX/2024_T1` is also accepted and
/// is displayed back in the same form it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseKey {
    org: String,
    number: String,
    run: String,
    legacy: bool,
}

impl CourseKey {
    pub fn new(org: &str, number: &str, run: &str) -> Result<Self, CourseKeyError> {
        let key = Self {
            org: org.to_string(),
            number: number.to_string(),
            run: run.to_string(),
            legacy: false,
        };

        if [org, number, run].iter().all(|part| is_valid_part(part)) {
            Ok(key)
        } else {
            Err(CourseKeyError::Invalid(key.to_string()))
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn run(&self) -> &str {
        &self.run
    }
}

/// Parts may contain ASCII alphanumerics and `_`, `-`, `~`, `.`
fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '~' | '.'))
}

impl FromStr for CourseKey {
    type Err = CourseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CourseKeyError::Invalid(s.to_string());

        let (parts, legacy): (Vec<&str>, bool) = match s.strip_prefix(PREFIX) {
            Some(rest) => (rest.split('+').collect(), false),
            None => (s.split('/').collect(), true),
        };

        let [org, number, run] = parts.as_slice() else {
            return Err(invalid());
        };

        let mut key = Self::new(org, number, run).map_err(|_| invalid())?;
        key.legacy = legacy;

        Ok(key)
    }
}

impl Display for CourseKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.legacy {
            write!(f, "{}/{}/{}", self.org, self.number, self.run)
        } else {
            write!(f, "{PREFIX}{}+{}+{}", self.org, self.number, self.run)
        }
    }
}

impl Serialize for CourseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
