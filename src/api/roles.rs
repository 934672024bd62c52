//! Role endpoints.

use super::client::CraftyClient;
use super::envelope::Envelope;
use super::routes;
use super::transport::Transport;
use crate::error::{Error, Result};
use crate::types::{PermissionMask, ResourceId, RolePermissions, ServerIds};
use reqwest::Method;
use serde_json::{Map, Value, json};
use tracing::info;

impl<T: Transport> CraftyClient<T> {
    /// List every role.
    pub async fn get_all_roles(&self) -> Result<Value> {
        self.get_data(routes::ROLES_URL).await
    }

    /// Create a role granting `permissions` on each of `server_ids`.
    pub async fn create_role(
        &self,
        name: &str,
        server_ids: impl Into<ServerIds>,
        permissions: &PermissionMask,
    ) -> Result<Envelope> {
        let servers = server_ids
            .into()
            .into_vec()
            .iter()
            .map(|id| -> Result<Value> {
                Ok(json!({
                    "server_id": id.as_int("server_ids")?,
                    "permissions": permissions,
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        let body = json!({
            "name": name,
            "servers": servers,
        });
        self.request(Method::POST, routes::ROLES_URL, &[], Self::json(body))
            .await
    }

    pub async fn get_role(&self, role_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::role(&role_id.into())?).await
    }

    /// Servers the role has access to, with their permissions.
    pub async fn get_role_servers(&self, role_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::role_resource(&role_id.into(), "servers")?)
            .await
    }

    /// User ids holding the role.
    pub async fn get_role_users(&self, role_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::role_resource(&role_id.into(), "users")?)
            .await
    }

    /// Delete a role. Requires a superuser token.
    pub async fn delete_role(&self, role_id: impl Into<ResourceId>) -> Result<Envelope> {
        let role_id = role_id.into();
        let response = self
            .request(Method::DELETE, &routes::role(&role_id)?, &[], None)
            .await?;
        if response.is_ok() {
            info!(%role_id, "Successfully removed role");
        }
        Ok(response)
    }

    /// Rename a role and/or change its per-server permissions.
    ///
    /// `server_ids` and `permissions` go together: giving only one of them is
    /// an error, and per-server permissions must match the ids in length.
    pub async fn modify_role(
        &self,
        role_id: impl Into<ResourceId>,
        name: Option<&str>,
        server_ids: Option<ServerIds>,
        permissions: Option<RolePermissions>,
    ) -> Result<Envelope> {
        let role_id = role_id.into();

        let servers = match (server_ids, permissions) {
            (None, None) => None,
            (Some(ids), Some(permissions)) => {
                let ids = ids.into_vec();
                let masks = permissions.for_servers(ids.len())?;
                let servers = ids
                    .iter()
                    .zip(masks)
                    .map(|(id, mask)| -> Result<Value> {
                        Ok(json!({
                            "id": id.as_int("server_ids")?,
                            "permissions": mask,
                        }))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Some(servers)
            }
            _ => {
                return Err(Error::invalid_argument(
                    "Both 'server_ids' and 'permissions' must be either provided or None",
                ));
            }
        };

        let mut body = Map::new();
        if let Some(name) = name {
            body.insert("name".to_string(), json!(name));
        }
        if let Some(servers) = servers {
            body.insert("servers".to_string(), Value::Array(servers));
        }

        self.request(
            Method::PATCH,
            &routes::role(&role_id)?,
            &[],
            Self::json(Value::Object(body)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::test_support::*;
    use crate::api::transport::{MockTransport, RequestBody};
    use crate::error::{Error, PanelErrorKind};
    use crate::types::{PermissionMask, ResourceId, RolePermissions, ServerIds};
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;

    fn mask(s: &str) -> PermissionMask {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_get_all_roles_returns_data() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/roles",
            ok_body(json!([{"role_id": 1, "role_name": "mods"}])),
        );

        let roles = client(mock).get_all_roles().await.unwrap();
        assert_eq!(roles, json!([{"role_id": 1, "role_name": "mods"}]));
    }

    #[tokio::test]
    async fn test_create_role_with_single_id_matches_list_form() {
        let body = json!({
            "name": "mods",
            "servers": [{"server_id": 3, "permissions": "11100000"}],
        });

        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(move |req| {
                req.method == Method::POST
                    && req.url.path() == "/api/v2/roles"
                    && req.body == Some(RequestBody::Json(body.clone()))
            })
            .times(2)
            .returning(|_| Ok(ok_body(json!({"role_id": 5}))));
        let client = client(mock);

        assert!(
            client
                .create_role("mods", 3, &mask("11100000"))
                .await
                .unwrap()
                .is_ok()
        );
        assert!(
            client
                .create_role("mods", vec!["3"], &mask("11100000"))
                .await
                .unwrap()
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_create_role_rejects_non_numeric_server_id() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let err = client(mock)
            .create_role("mods", "abc", &PermissionMask::all())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_role_paths_ignore_id_representation() {
        let mut mock = MockTransport::new();
        expect_n(
            &mut mock,
            Method::GET,
            "/api/v2/roles/2",
            2,
            ok_body(json!({"role_id": 2})),
        );
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/roles/2/servers",
            ok_body(json!([])),
        );
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/roles/2/users",
            ok_body(json!([1, 4])),
        );
        let client = client(mock);

        assert_eq!(
            client.get_role(2).await.unwrap(),
            client.get_role("2").await.unwrap()
        );
        assert_eq!(client.get_role_servers(2).await.unwrap(), json!([]));
        assert_eq!(client.get_role_users("2").await.unwrap(), json!([1, 4]));
    }

    #[tokio::test]
    async fn test_delete_role_access_denied() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::DELETE,
            "/api/v2/roles/2",
            json!({"status": "error", "error": "ACCESS_DENIED", "error_data": "superuser only"})
                .to_string(),
        );

        let err = client(mock).delete_role(2).await.unwrap_err();
        match err {
            Error::Panel { kind, detail } => {
                assert_eq!(kind, PanelErrorKind::AccessDenied);
                assert_eq!(detail.as_deref(), Some("superuser only"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_modify_role_requires_ids_and_permissions_together() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();
        let client = client(mock);

        let err = client
            .modify_role(1, None, Some(ServerIds::from(3)), None)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = client
            .modify_role(1, None, None, Some(mask("10000000").into()))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_modify_role_rejects_unequal_lengths() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();
        let servers = ServerIds::from(vec![1, 2, 3]);
        let permissions = RolePermissions::from(vec![mask("10000000"), mask("01000000")]);

        let err = client(mock)
            .modify_role(1, None, Some(servers), Some(permissions))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_modify_role_repeats_single_mask() {
        let mut mock = MockTransport::new();
        expect_json(
            &mut mock,
            Method::PATCH,
            "/api/v2/roles/1",
            json!({
                "name": "admins",
                "servers": [
                    {"id": 1, "permissions": "11111111"},
                    {"id": 2, "permissions": "11111111"},
                ],
            }),
            ok_body(json!(null)),
        );

        let env = client(mock)
            .modify_role(
                ResourceId::from("1"),
                Some("admins"),
                Some(ServerIds::from(vec![1, 2])),
                Some(PermissionMask::all().into()),
            )
            .await
            .unwrap();
        assert!(env.is_ok());
    }

    #[tokio::test]
    async fn test_modify_role_name_only() {
        let mut mock = MockTransport::new();
        expect_json(
            &mut mock,
            Method::PATCH,
            "/api/v2/roles/4",
            json!({"name": "renamed"}),
            ok_body(json!(null)),
        );

        assert!(
            client(mock)
                .modify_role(4, Some("renamed"), None, None)
                .await
                .unwrap()
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_array_response_is_not_an_empty_success() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/roles",
            r#"["oops"]"#.to_string(),
        );

        let err = client(mock).get_all_roles().await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }
}
