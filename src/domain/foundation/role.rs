//! Participant roles within an estimation session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Role a user holds inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Created the session and owns its task list.
    Author,
    /// Drives the estimation rounds.
    Moderator,
    /// Casts estimation votes.
    Voter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Author => "Author",
            Role::Moderator => "Moderator",
            Role::Voter => "Voter",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Author" => Ok(Role::Author),
            "Moderator" => Ok(Role::Moderator),
            "Voter" => Ok(Role::Voter),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_roundtrip_through_display_and_from_str() {
        for role in [Role::Author, Role::Moderator, Role::Voter] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn from_str_rejects_unknown_role() {
        let result: Result<Role, _> = "Spectator".parse();
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_variant_name() {
        assert_eq!(serde_json::to_string(&Role::Voter).unwrap(), "\"Voter\"");
    }
}
