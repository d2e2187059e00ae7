//! User roles and the per-action allow-lists checked before every write.
//!
//! Role names must match the `CHECK` constraint on `users.role`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    ContentManager,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::ContentManager => "CONTENT_MANAGER",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "ADMIN" => Ok(Role::Admin),
            "CONTENT_MANAGER" => Ok(Role::ContentManager),
            "USER" => Ok(Role::User),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// Roles allowed to create and edit content.
pub const CONTENT_EDITORS: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::ContentManager];

/// Roles allowed to delete content.
pub const ADMINS: &[Role] = &[Role::SuperAdmin, Role::Admin];

/// Roles allowed to manage user accounts.
pub const SUPER_ADMINS: &[Role] = &[Role::SuperAdmin];

/// Check `role` against an action's allow-list.
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&role) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(CoreError::Forbidden(format!(
        "One of the following roles is required: {}",
        names.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn content_manager_may_edit_but_not_delete() {
        assert!(authorize(Role::ContentManager, CONTENT_EDITORS).is_ok());
        assert_matches!(
            authorize(Role::ContentManager, ADMINS),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn plain_user_is_rejected_everywhere() {
        for list in [CONTENT_EDITORS, ADMINS, SUPER_ADMINS] {
            assert_matches!(authorize(Role::User, list), Err(CoreError::Forbidden(_)));
        }
    }

    #[test]
    fn only_super_admin_manages_users() {
        assert!(authorize(Role::SuperAdmin, SUPER_ADMINS).is_ok());
        assert!(authorize(Role::Admin, SUPER_ADMINS).is_err());
    }

    #[test]
    fn forbidden_message_lists_allowed_roles() {
        let err = authorize(Role::User, ADMINS).unwrap_err();
        assert!(err.to_string().contains("SUPER_ADMIN, ADMIN"));
    }

    #[test]
    fn role_names_round_trip() {
        for role in [Role::SuperAdmin, Role::Admin, Role::ContentManager, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
    }
}
