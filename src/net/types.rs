//! Wire types for the admin API.
//!
//! Most endpoints wrap their payload in [`Envelope`] and signal success with
//! `code == 0`; the login endpoint is the one exception and returns
//! [`LoginGrant`] fields at the top level with success signalled by the HTTP
//! status. The two shapes are kept as explicit variants discriminated by
//! endpoint rather than sniffed at runtime.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The `{code, message, data}` wrapper carried by every non-login response.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Successful response of `POST /admin/login`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginGrant {
    pub access_token: String,
    pub token_type: String,
}

/// Role of an authenticated administrator. Authorization decisions are made
/// server-side; the client only displays the role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Moderator,
    Viewer,
}

impl AdminRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Superadmin => "Superadmin",
            Self::Moderator => "Moderator",
            Self::Viewer => "Viewer",
        }
    }
}

/// The authenticated administrator, as returned by `GET /admin/me`.
///
/// Refreshed wholesale on every validation; never patched field-by-field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub role: AdminRole,
    pub is_active: bool,
}

/// Moderation status of a platform user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Banned,
}

impl UserStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Banned => "banned",
        }
    }
}

/// A platform user subject to moderation, owned by the remote system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: i64,
    pub telegram_id: String,
    pub email: Option<String>,
    pub status: UserStatus,
    pub points: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A group member, as returned by `GET /admin/groups/members`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub user_id: i64,
    pub username: String,
    pub status: String,
    pub joined_date: String,
    pub is_muted: bool,
}

/// One point of the user growth series.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GrowthPoint {
    pub date: String,
    pub users: i64,
}

/// One bucket of the points distribution.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PointsBucket {
    pub range: String,
    pub count: i64,
}

/// One point of the verification success-rate series.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VerificationPoint {
    pub date: String,
    pub rate: f64,
}
