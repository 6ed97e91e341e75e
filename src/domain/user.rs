//! Users and roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;
use crate::error::KeeperError;

/// System-wide role of a user.
///
/// Registration only ever issues [`Role::Admin`]. [`Role::Host`] is never
/// issued but is still honoured by the access policy as admin-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Event host, admitted to admin routes.
    Host,
    /// Team coach.
    Coach,
    /// Player.
    Player,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Host => "host",
            Self::Coach => "coach",
            Self::Player => "player",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "host" => Ok(Self::Host),
            "coach" => Ok(Self::Coach),
            "player" => Ok(Self::Player),
            other => Err(KeeperError::ValidationFailed(format!("unknown role: {other}"))),
        }
    }
}

/// Role a user asks for when joining an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// Take part as a player.
    #[default]
    Player,
    /// Take part as a coach.
    Coach,
    /// Help run the event.
    Admin,
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Player => "player",
            Self::Coach => "coach",
            Self::Admin => "admin",
        })
    }
}

/// A registered user as seen by the rest of the system.
///
/// Users are created at registration and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique case-insensitively.
    pub email: String,
    /// System role.
    pub role: Role,
}

impl User {
    /// Creates a user with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}
