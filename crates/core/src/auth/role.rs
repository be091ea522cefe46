use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A permission flag gating one class of admin operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "canManageUsers")]
    ManageUsers,
    #[serde(rename = "canViewLogs")]
    ViewLogs,
    #[serde(rename = "canManageProducts")]
    ManageProducts,
    #[serde(rename = "canManageSettings")]
    ManageSettings,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::ManageUsers,
        Capability::ViewLogs,
        Capability::ManageProducts,
        Capability::ManageSettings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ManageUsers => "canManageUsers",
            Capability::ViewLogs => "canViewLogs",
            Capability::ManageProducts => "canManageProducts",
            Capability::ManageSettings => "canManageSettings",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Admin,
    Designer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Developer, Role::Admin, Role::Designer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::Admin => "admin",
            Role::Designer => "designer",
        }
    }

    /// The role's capability set.
    pub fn grants(self, capability: Capability) -> bool {
        match (self, capability) {
            (Role::Developer, _) => true,
            (Role::Admin, Capability::ManageProducts | Capability::ManageSettings) => true,
            (Role::Admin, Capability::ManageUsers | Capability::ViewLogs) => false,
            (Role::Designer, Capability::ManageProducts) => true,
            (
                Role::Designer,
                Capability::ManageUsers | Capability::ViewLogs | Capability::ManageSettings,
            ) => false,
        }
    }

    pub fn capabilities(self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.grants(*c))
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name {0:?}")]
pub struct UnknownName(pub String);

/// Whether a stored role name grants `capability`. Unknown roles grant nothing.
pub fn has_permission(role: &str, capability: Capability) -> bool {
    role.parse::<Role>().is_ok_and(|r| r.grants(capability))
}

/// Capability a named admin view requires. Views not listed are open to
/// every signed-in user.
pub fn required_capability(view: &str) -> Option<Capability> {
    match view {
        "users" => Some(Capability::ManageUsers),
        "logs" => Some(Capability::ViewLogs),
        "settings" => Some(Capability::ManageSettings),
        _ => None,
    }
}
