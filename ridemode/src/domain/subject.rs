//! Subject identity for role changes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`SubjectId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectIdValidationError {
    Empty,
    SurroundingWhitespace,
}

impl fmt::Display for SubjectIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "subject id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "subject id must not carry leading or trailing whitespace")
            }
        }
    }
}

impl std::error::Error for SubjectIdValidationError {}

/// Identity of the record a role change acts on.
///
/// Opaque: the upstream account service hands out free-form ids, so the only
/// validation is that the value is non-empty and carries no surrounding
/// whitespace.
///
/// # Examples
///
/// ```
/// use ridemode::domain::SubjectId;
///
/// let id = SubjectId::new("42").expect("valid id");
/// assert_eq!(id.as_str(), "42");
/// assert!(SubjectId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Validate and construct a [`SubjectId`].
    pub fn new(id: impl Into<String>) -> Result<Self, SubjectIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SubjectIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(SubjectIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SubjectId {
    type Error = SubjectIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectId> for String {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for subject id validation.

    use rstest::rstest;

    use super::*;

    #[test]
    fn accepts_opaque_ids() {
        let id = SubjectId::new("64f1c0a2e9").expect("valid id");
        assert_eq!(id.as_str(), "64f1c0a2e9");
        assert_eq!(id.to_string(), "64f1c0a2e9");
    }

    #[rstest]
    #[case::empty("", SubjectIdValidationError::Empty)]
    #[case::leading(" 42", SubjectIdValidationError::SurroundingWhitespace)]
    #[case::trailing("42 ", SubjectIdValidationError::SurroundingWhitespace)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: SubjectIdValidationError) {
        let error = SubjectId::new(raw).expect_err("invalid id");
        assert_eq!(error, expected);
    }

    #[test]
    fn deserialisation_applies_the_same_validation() {
        let parsed: SubjectId = serde_json::from_str("\"42\"").expect("valid id");
        assert_eq!(parsed.as_str(), "42");
        assert!(serde_json::from_str::<SubjectId>("\"\"").is_err());
    }
}
