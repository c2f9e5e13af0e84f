//! Categorical employee flags and their two encodings.
//!
//! The database stores role and deletion state as text constants, while forms
//! carry small integers. Each flag has exactly one value per logical state on
//! each side.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Text constants stored in the `employees` table.
pub mod persisted {
    /// Administrator role.
    pub const ROLE_ADMIN: &str = "ADMIN";
    /// General staff role.
    pub const ROLE_GENERAL: &str = "GENERAL";
    /// Record is live.
    pub const FLAG_ACTIVE: &str = "ACTIVE";
    /// Record is logically deleted.
    pub const FLAG_DELETED: &str = "DELETED";
}

/// Integer codes used by forms.
pub mod form_code {
    /// Administrator role.
    pub const ROLE_ADMIN: i32 = 1;
    /// General staff role.
    pub const ROLE_GENERAL: i32 = 2;
    /// Record is live.
    pub const FLAG_ACTIVE: i32 = 0;
    /// Record is logically deleted.
    pub const FLAG_DELETED: i32 = 1;
}

/// Employee role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    General,
}

impl Role {
    /// Database constant for this role.
    pub const fn as_persisted(self) -> &'static str {
        match self {
            Self::Admin => persisted::ROLE_ADMIN,
            Self::General => persisted::ROLE_GENERAL,
        }
    }

    /// Decode a database constant. Anything other than the admin constant is general.
    pub fn from_persisted(value: &str) -> Self {
        match value {
            persisted::ROLE_ADMIN => Self::Admin,
            persisted::ROLE_GENERAL => Self::General,
            other => {
                warn!("Unknown stored role {other:?}, treating as general");
                Self::General
            }
        }
    }

    /// Form code for this role.
    pub const fn as_form(self) -> i32 {
        match self {
            Self::Admin => form_code::ROLE_ADMIN,
            Self::General => form_code::ROLE_GENERAL,
        }
    }

    /// Decode a form code. Out-of-range codes are coerced to general.
    pub fn from_form(code: i32) -> Self {
        match code {
            form_code::ROLE_ADMIN => Self::Admin,
            form_code::ROLE_GENERAL => Self::General,
            other => {
                warn!("Unknown role code {other}, treating as general");
                Self::General
            }
        }
    }
}

/// Logical deletion state of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteFlag {
    Active,
    Deleted,
}

impl DeleteFlag {
    /// Database constant for this state.
    pub const fn as_persisted(self) -> &'static str {
        match self {
            Self::Active => persisted::FLAG_ACTIVE,
            Self::Deleted => persisted::FLAG_DELETED,
        }
    }

    /// Decode a database constant. Anything other than the deleted constant is active.
    pub fn from_persisted(value: &str) -> Self {
        match value {
            persisted::FLAG_DELETED => Self::Deleted,
            persisted::FLAG_ACTIVE => Self::Active,
            other => {
                warn!("Unknown stored delete flag {other:?}, treating as active");
                Self::Active
            }
        }
    }

    /// Form code for this state.
    pub const fn as_form(self) -> i32 {
        match self {
            Self::Active => form_code::FLAG_ACTIVE,
            Self::Deleted => form_code::FLAG_DELETED,
        }
    }

    /// Decode a form code. Out-of-range codes are coerced to active.
    pub fn from_form(code: i32) -> Self {
        match code {
            form_code::FLAG_DELETED => Self::Deleted,
            form_code::FLAG_ACTIVE => Self::Active,
            other => {
                warn!("Unknown delete flag code {other}, treating as active");
                Self::Active
            }
        }
    }

    pub fn is_deleted(self) -> bool {
        self == Self::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_encodings_are_inverse() {
        for role in [Role::Admin, Role::General] {
            assert_eq!(Role::from_persisted(role.as_persisted()), role);
            assert_eq!(Role::from_form(role.as_form()), role);
        }
    }

    #[test]
    fn test_delete_flag_encodings_are_inverse() {
        for flag in [DeleteFlag::Active, DeleteFlag::Deleted] {
            assert_eq!(DeleteFlag::from_persisted(flag.as_persisted()), flag);
            assert_eq!(DeleteFlag::from_form(flag.as_form()), flag);
        }
    }

    #[test]
    fn test_out_of_range_codes_coerce() {
        assert_eq!(Role::from_form(0), Role::General);
        assert_eq!(Role::from_form(99), Role::General);
        assert_eq!(Role::from_persisted("admin"), Role::General);
        assert_eq!(DeleteFlag::from_form(-1), DeleteFlag::Active);
        assert_eq!(DeleteFlag::from_persisted(""), DeleteFlag::Active);
    }

    #[test]
    fn test_encodings_are_disjoint_per_state() {
        // Same integer means different things for role and flag; constants never overlap.
        assert_ne!(persisted::ROLE_ADMIN, persisted::ROLE_GENERAL);
        assert_ne!(persisted::FLAG_ACTIVE, persisted::FLAG_DELETED);
        assert_ne!(form_code::ROLE_ADMIN, form_code::ROLE_GENERAL);
        assert_ne!(form_code::FLAG_ACTIVE, form_code::FLAG_DELETED);
    }
}
