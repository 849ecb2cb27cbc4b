//! Rider/user role domain type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The account role being toggled.
///
/// Serialized as `"user"` / `"rider"`, the wire and storage spelling used by
/// the account service.
///
/// # Examples
///
/// ```
/// use ridemode::domain::Role;
///
/// assert_eq!(Role::default(), Role::Rider);
/// assert_eq!(Role::User.toggled(), Role::Rider);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A passenger account.
    User,
    /// A rider (driver) account.
    #[default]
    Rider,
}

impl Role {
    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Rider => "rider",
        }
    }

    /// Maps the toggle flag onto a role; `true` means `User`.
    pub fn from_flag(flag: bool) -> Self {
        if flag { Self::User } else { Self::Rider }
    }

    /// Maps the role back onto the toggle flag.
    pub fn as_flag(self) -> bool {
        self == Self::User
    }

    /// The other role.
    pub fn toggled(self) -> Self {
        match self {
            Self::User => Self::Rider,
            Self::Rider => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role {:?}, expected \"user\" or \"rider\"", self.0)
    }
}

impl std::error::Error for RoleParseError {}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "rider" => Ok(Self::Rider),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for role parsing and flag mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::user(Role::User, "user")]
    #[case::rider(Role::Rider, "rider")]
    fn formats_and_parses_wire_strings(#[case] role: Role, #[case] wire: &str) {
        assert_eq!(role.as_str(), wire);
        assert_eq!(role.to_string(), wire);
        assert_eq!(wire.parse::<Role>().expect("known role"), role);
    }

    #[test]
    fn rejects_unknown_role_strings() {
        let error = "driver".parse::<Role>().expect_err("unknown role");
        assert!(error.to_string().contains("driver"));
    }

    #[test]
    fn flag_mapping_round_trips() {
        assert_eq!(Role::from_flag(true), Role::User);
        assert_eq!(Role::from_flag(false), Role::Rider);
        assert!(Role::User.as_flag());
        assert!(!Role::Rider.as_flag());
    }

    #[test]
    fn toggling_alternates_between_the_two_roles() {
        assert_eq!(Role::User.toggled(), Role::Rider);
        assert_eq!(Role::Rider.toggled(), Role::User);
        assert_eq!(Role::User.toggled().toggled(), Role::User);
    }

    #[test]
    fn serialises_as_lowercase_strings() {
        let json = serde_json::to_string(&Role::User).expect("serialise");
        assert_eq!(json, "\"user\"");
        let parsed: Role = serde_json::from_str("\"rider\"").expect("deserialise");
        assert_eq!(parsed, Role::Rider);
    }
}
