//! User endpoints.

use super::client::CraftyClient;
use super::envelope::Envelope;
use super::routes;
use super::transport::Transport;
use crate::error::{Error, Result};
use crate::types::{NewUser, ResourceId, UserPatch, role_ids};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

impl<T: Transport> CraftyClient<T> {
    pub async fn get_all_users(&self) -> Result<Value> {
        self.get_data(routes::USERS_URL).await
    }

    /// Create a user.
    ///
    /// Role ids are checked against the panel's role list first; if any is
    /// unknown nothing is created and the error lists every invalid and
    /// every valid id.
    pub async fn create_user(&self, user: NewUser) -> Result<Envelope> {
        if let Some(roles) = user.roles.as_deref().filter(|roles| !roles.is_empty()) {
            self.check_roles(roles).await?;
        }

        let body = serde_json::to_value(&user)?;
        self.request(Method::POST, routes::USERS_URL, &[], Self::json(body))
            .await
    }

    async fn check_roles(&self, roles: &[ResourceId]) -> Result<()> {
        let valid = role_ids(&self.get_all_roles().await?);
        let invalid: Vec<String> = roles
            .iter()
            .map(ToString::to_string)
            .filter(|role| !valid.contains(role))
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidRoles { invalid, valid })
        }
    }

    pub async fn get_user(&self, user_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::user(&user_id.into())?).await
    }

    pub async fn delete_user(&self, user_id: impl Into<ResourceId>) -> Result<Envelope> {
        let user_id = user_id.into();
        let response = self
            .request(Method::DELETE, &routes::user(&user_id)?, &[], None)
            .await?;
        if response.is_ok() {
            info!(%user_id, "Successfully removed user");
        }
        Ok(response)
    }

    /// Send only the fields set on `patch`.
    pub async fn modify_user(
        &self,
        user_id: impl Into<ResourceId>,
        patch: UserPatch,
    ) -> Result<Envelope> {
        let body = patch.into_json()?;
        self.request(
            Method::PATCH,
            &routes::user(&user_id.into())?,
            &[],
            Self::json(body),
        )
        .await
    }

    /// Crafty-level permissions (server creation, user and role config).
    pub async fn get_user_crafty_permissions(
        &self,
        user_id: impl Into<ResourceId>,
    ) -> Result<Value> {
        self.get_data(&routes::user_resource(&user_id.into(), "permissions")?)
            .await
    }

    /// Link to the user's profile picture.
    pub async fn get_user_profile_picture(&self, user_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::user_resource(&user_id.into(), "pfp")?)
            .await
    }

    pub async fn get_user_public_data(&self, user_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::user_resource(&user_id.into(), "public")?)
            .await
    }
}
