//! Workshop roles.
//!
//! Role names travel inside the JWT `role` claim and are stored verbatim in
//! the `users.role` column (see the `ck_users_role` check constraint).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADVISOR: &str = "advisor";
pub const ROLE_TECHNICIAN: &str = "technician";
pub const ROLE_CASHIER: &str = "cashier";
pub const ROLE_MANAGER: &str = "manager";

/// The four staff roles of a workshop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Service advisor: opens job cards at the front desk.
    Advisor,
    /// Works on vehicles and moves job cards through their statuses.
    Technician,
    /// Bills completed jobs.
    Cashier,
    /// Oversees the floor; sees aggregate stats.
    Manager,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Advisor,
        Role::Technician,
        Role::Cashier,
        Role::Manager,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Advisor => ROLE_ADVISOR,
            Role::Technician => ROLE_TECHNICIAN,
            Role::Cashier => ROLE_CASHIER,
            Role::Manager => ROLE_MANAGER,
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
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "Invalid role '{s}'. Must be one of: {ROLE_ADVISOR}, {ROLE_TECHNICIAN}, \
                     {ROLE_CASHIER}, {ROLE_MANAGER}"
                ))
            })
    }
}
