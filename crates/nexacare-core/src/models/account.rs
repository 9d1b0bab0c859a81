//! Account models: Doctor, HR, and Admin login identities.

use serde::{Deserialize, Serialize};

/// Account role. Each role maps to its own table and user-id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Doctor,
    Hr,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Doctor, Role::Hr, Role::Admin];

    /// Table backing this role.
    pub fn table(&self) -> &'static str {
        match self {
            Role::Doctor => "doctors",
            Role::Hr => "hrs",
            Role::Admin => "admins",
        }
    }

    /// Prefix letter used in generated user ids.
    pub fn prefix(&self) -> char {
        match self {
            Role::Doctor => 'D',
            Role::Hr => 'H',
            Role::Admin => 'A',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "Doctor",
            Role::Hr => "HR",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Doctor" => Some(Role::Doctor),
            "HR" => Some(Role::Hr),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A stored account. The password hash never leaves the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Role-prefixed, year-stamped id (e.g. `2025D0001`). Immutable.
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Doctors and HR start unverified; admins are verified at creation.
    pub is_verified: bool,
    pub created_at: String,
}

impl Account {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Listing projection: everything except the credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSummary {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_verified: bool,
}

/// Input for account creation. The role arrives as entered and is
/// validated before any table is selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Partial account update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_verified: Option<bool>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.is_verified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_table_mapping() {
        assert_eq!(Role::Doctor.table(), "doctors");
        assert_eq!(Role::Hr.table(), "hrs");
        assert_eq!(Role::Admin.table(), "admins");
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Receptionist"), None);
    }

    #[test]
    fn test_display_name() {
        let account = Account {
            user_id: "2025D0001".into(),
            first_name: "Jo".into(),
            last_name: "Lee".into(),
            email: "jo.lee@nexacare.med".into(),
            is_verified: false,
            created_at: "2025-01-01 00:00:00".into(),
        };
        assert_eq!(account.display_name(), "Jo Lee");
    }

    #[test]
    fn test_empty_update() {
        assert!(AccountUpdate::default().is_empty());
        let update = AccountUpdate {
            email: Some("new@nexacare.med".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
