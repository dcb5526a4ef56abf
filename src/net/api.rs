//! Endpoint methods for the admin API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` through the
//! transport in [`crate::net::client`]. Server-side (SSR): stubs returning
//! [`ApiError::Unsupported`] since these endpoints are only meaningful in
//! the browser — callers never need their own `cfg` gates.

// The SSR stubs keep the async signatures and ignore `self`.
#![allow(clippy::unused_async, clippy::unused_self)]

use crate::net::client::{Api, ApiError};
use crate::net::types::{
    GroupMember, GrowthPoint, LoginGrant, ManagedUser, PointsBucket, Principal, VerificationPoint,
};

/// The authentication endpoints, as a seam so the session drivers can be
/// exercised against a scripted double.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /admin/login`, credential-grant semantics.
    async fn login_grant(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError>;
    /// `GET /admin/me`.
    async fn fetch_profile(&self) -> Result<Principal, ApiError>;
    /// `POST /admin/logout`.
    async fn end_session(&self) -> Result<(), ApiError>;
}

impl AuthApi for Api {
    async fn login_grant(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError> {
        self.request_login_grant(username, password).await
    }

    async fn fetch_profile(&self) -> Result<Principal, ApiError> {
        self.request_profile().await
    }

    async fn end_session(&self) -> Result<(), ApiError> {
        self.request_logout().await
    }
}

impl Api {
    /// Exchange credentials for a bearer token.
    ///
    /// This is the one endpoint that does not use the response envelope:
    /// success is HTTP 200 with the token fields at the top level, and a 401
    /// here means bad credentials rather than a rejected session, so the
    /// global 401 policy does not apply.
    async fn request_login_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginGrant, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let body = crate::net::client::form_encode(&[
                ("username", username),
                ("password", password),
                ("grant_type", "password"),
            ]);
            let request = gloo_net::http::Request::post(&self.url("/admin/login"))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .header("Accept", "application/json")
                .body(body)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = self.dispatch(request, false).await?;
            if response.status() != 200 {
                return Err(ApiError::Api(
                    crate::net::client::failure_message(&response).await,
                ));
            }
            response
                .json::<LoginGrant>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(ApiError::Unsupported)
        }
    }

    async fn request_profile(&self) -> Result<Principal, ApiError> {
        self.get_data("/admin/me").await
    }

    async fn request_logout(&self) -> Result<(), ApiError> {
        self.post_empty("/admin/logout").await
    }

    /// List all platform users.
    pub async fn fetch_users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        self.get_data("/admin/users").await
    }

    /// Ban a user. The list must be refetched afterwards; the server copy is
    /// authoritative.
    pub async fn ban_user(&self, user_id: i64, reason: &str) -> Result<(), ApiError> {
        self.post_action(
            &format!("/admin/users/{user_id}/ban"),
            &serde_json::json!({ "reason": reason }),
        )
        .await
    }

    /// Lift a user ban.
    pub async fn unban_user(&self, user_id: i64, reason: &str) -> Result<(), ApiError> {
        self.post_action(
            &format!("/admin/users/{user_id}/unban"),
            &serde_json::json!({ "reason": reason }),
        )
        .await
    }

    /// Adjust a user's points balance by a signed delta.
    pub async fn adjust_points(
        &self,
        user_id: i64,
        points: i64,
        reason: &str,
    ) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self
                .authorized(gloo_net::http::Request::put(
                    &self.url(&format!("/admin/users/{user_id}/points")),
                ))
                .json(&serde_json::json!({ "points": points, "reason": reason }))
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = self.dispatch(request, true).await?;
            self.read_envelope_ok(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user_id, points, reason);
            Err(ApiError::Unsupported)
        }
    }

    /// Reset a user's points balance to zero.
    pub async fn reset_points(&self, user_id: i64, reason: &str) -> Result<(), ApiError> {
        self.post_action(
            &format!("/admin/users/{user_id}/reset-points"),
            &serde_json::json!({ "reason": reason }),
        )
        .await
    }

    /// List the members of the managed group.
    pub async fn fetch_group_members(&self) -> Result<Vec<GroupMember>, ApiError> {
        self.get_data("/admin/groups/members").await
    }

    /// Mute a group member, optionally for a bounded number of minutes.
    pub async fn mute_member(
        &self,
        user_id: i64,
        duration: Option<u32>,
        reason: Option<&str>,
    ) -> Result<(), ApiError> {
        self.post_action(
            &format!("/admin/groups/members/{user_id}/mute"),
            &serde_json::json!({ "duration": duration, "reason": reason }),
        )
        .await
    }

    /// Lift a group member's mute.
    pub async fn unmute_member(&self, user_id: i64, reason: Option<&str>) -> Result<(), ApiError> {
        self.post_action(
            &format!("/admin/groups/members/{user_id}/unmute"),
            &serde_json::json!({ "reason": reason }),
        )
        .await
    }

    /// Remove a member from the group.
    pub async fn kick_member(&self, user_id: i64, reason: Option<&str>) -> Result<(), ApiError> {
        self.post_action(
            &format!("/admin/groups/members/{user_id}/kick"),
            &serde_json::json!({ "reason": reason }),
        )
        .await
    }

    pub async fn fetch_user_growth(&self) -> Result<Vec<GrowthPoint>, ApiError> {
        self.get_data("/admin/stats/user-growth").await
    }

    pub async fn fetch_points_distribution(&self) -> Result<Vec<PointsBucket>, ApiError> {
        self.get_data("/admin/stats/points-distribution").await
    }

    pub async fn fetch_verification_rate(&self) -> Result<Vec<VerificationPoint>, ApiError> {
        self.get_data("/admin/stats/verification-rate").await
    }

    async fn get_data<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self
                .authorized(gloo_net::http::Request::get(&self.url(path)))
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = self.dispatch(request, true).await?;
            self.read_envelope(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(ApiError::Unsupported)
        }
    }

    async fn post_action(&self, path: &str, body: &serde_json::Value) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self
                .authorized(gloo_net::http::Request::post(&self.url(path)))
                .json(body)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = self.dispatch(request, true).await?;
            self.read_envelope_ok(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(ApiError::Unsupported)
        }
    }

    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self
                .authorized(gloo_net::http::Request::post(&self.url(path)))
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = self.dispatch(request, true).await?;
            self.read_envelope_ok(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(ApiError::Unsupported)
        }
    }
}
