//! Server endpoints.

use super::client::CraftyClient;
use super::envelope::Envelope;
use super::routes;
use super::transport::{RequestBody, Transport};
use crate::error::Result;
use crate::types::{LogOptions, ResourceId, ServerAction, ServerPatch};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

impl<T: Transport> CraftyClient<T> {
    /// List every server visible to the token.
    pub async fn get_all_servers(&self) -> Result<Value> {
        self.get_data(routes::SERVERS_URL).await
    }

    pub async fn get_server(&self, server_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::server(&server_id.into())?).await
    }

    pub async fn delete_server(&self, server_id: impl Into<ResourceId>) -> Result<Envelope> {
        let server_id = server_id.into();
        let response = self
            .request(Method::DELETE, &routes::server(&server_id)?, &[], None)
            .await?;
        if response.is_ok() {
            info!(%server_id, "Successfully removed server");
        }
        Ok(response)
    }

    /// Apply a partial update to a server's settings.
    pub async fn modify_server(
        &self,
        server_id: impl Into<ResourceId>,
        patch: ServerPatch,
    ) -> Result<Envelope> {
        self.request(
            Method::PATCH,
            &routes::server(&server_id.into())?,
            &[],
            Self::json(patch.into_json()),
        )
        .await
    }

    /// Start, stop, back up or otherwise act on a server.
    pub async fn send_server_action(
        &self,
        server_id: impl Into<ResourceId>,
        action: ServerAction,
    ) -> Result<Envelope> {
        self.request(
            Method::POST,
            &routes::server_action(&server_id.into(), action)?,
            &[],
            None,
        )
        .await
    }

    /// Write a line to the server's console.
    pub async fn send_stdin(
        &self,
        server_id: impl Into<ResourceId>,
        command: &str,
    ) -> Result<Envelope> {
        self.request(
            Method::POST,
            &routes::server_resource(&server_id.into(), "stdin")?,
            &[],
            Some(RequestBody::Text(command.to_string())),
        )
        .await
    }

    pub async fn get_server_logs(
        &self,
        server_id: impl Into<ResourceId>,
        options: &LogOptions,
    ) -> Result<Value> {
        let path = routes::server_resource(&server_id.into(), "logs")?;
        Ok(self
            .request(Method::GET, &path, &options.query(), None)
            .await?
            .into_data())
    }

    /// Public metadata: name, description, id, creation date and type.
    pub async fn get_server_public_data(&self, server_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::server_resource(&server_id.into(), "public")?)
            .await
    }

    pub async fn get_server_stats(&self, server_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::server_resource(&server_id.into(), "stats")?)
            .await
    }

    /// Users with access to the server.
    pub async fn get_server_users(&self, server_id: impl Into<ResourceId>) -> Result<Value> {
        self.get_data(&routes::server_resource(&server_id.into(), "users")?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::test_support::*;
    use crate::api::transport::{MockTransport, RequestBody};
    use crate::error::PanelErrorKind;
    use crate::types::{LogOptions, ServerAction, ServerPatch};
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_server_by_int_and_str() {
        let mut mock = MockTransport::new();
        expect_n(
            &mut mock,
            Method::GET,
            "/api/v2/servers/8",
            2,
            ok_body(json!({"server_id": 8})),
        );
        let client = client(mock);

        assert_eq!(client.get_server(8).await.unwrap(), json!({"server_id": 8}));
        assert_eq!(
            client.get_server("8").await.unwrap(),
            json!({"server_id": 8})
        );
    }

    #[tokio::test]
    async fn test_each_action_posts_to_its_path() {
        let mut mock = MockTransport::new();
        for action in ServerAction::ALL {
            expect(
                &mut mock,
                Method::POST,
                &format!("/api/v2/servers/1/action/{}", action.as_str()),
                ok_body(json!(null)),
            );
        }
        let client = client(mock);

        for action in ServerAction::ALL {
            assert!(client.send_server_action(1, action).await.unwrap().is_ok());
        }
    }

    #[tokio::test]
    async fn test_start_running_server() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::POST,
            "/api/v2/servers/1/action/start_server",
            json!({"status": "error", "error": "SER_RUNNING"}).to_string(),
        );

        let err = client(mock)
            .send_server_action(1, ServerAction::Start)
            .await
            .unwrap_err();
        assert_eq!(err.panel_kind(), Some(PanelErrorKind::ServerAlreadyRunning));
    }

    #[tokio::test]
    async fn test_modify_server_sends_filtered_patch() {
        let mut mock = MockTransport::new();
        expect_json(
            &mut mock,
            Method::PATCH,
            "/api/v2/servers/2",
            json!({"server_name": "survival", "auto_start": true}),
            ok_body(json!(null)),
        );

        let patch = ServerPatch::new()
            .set("server_name", "survival")
            .set("auto_start", true)
            .set("owner", "nobody");
        assert!(client(mock).modify_server(2, patch).await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_stdin_sends_raw_text() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.method == Method::POST
                    && req.url.path() == "/api/v2/servers/3/stdin"
                    && req.body == Some(RequestBody::Text("say hello".to_string()))
            })
            .times(1)
            .returning(|_| Ok(ok_body(json!(null))));

        assert!(
            client(mock)
                .send_stdin(3, "say hello")
                .await
                .unwrap()
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_stdin_on_stopped_server() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::POST,
            "/api/v2/servers/3/stdin",
            json!({"status": "error", "error": "SER_NOT_RUNNING"}).to_string(),
        );

        let err = client(mock).send_stdin(3, "list").await.unwrap_err();
        assert_eq!(err.panel_kind(), Some(PanelErrorKind::ServerNotRunning));
    }

    #[tokio::test]
    async fn test_logs_query_flags() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.url.path() == "/api/v2/servers/5/logs" && req.query.is_empty())
            .times(1)
            .returning(|_| Ok(ok_body(json!(["line 1"]))));
        mock.expect_send()
            .withf(|req| {
                req.url.path() == "/api/v2/servers/5/logs"
                    && req.query
                        == vec![
                            ("file".to_string(), "true".to_string()),
                            ("raw".to_string(), "true".to_string()),
                        ]
            })
            .times(1)
            .returning(|_| Ok(ok_body(json!(["line 2"]))));
        let client = client(mock);

        assert_eq!(
            client.get_server_logs(5, &LogOptions::new()).await.unwrap(),
            json!(["line 1"])
        );
        assert_eq!(
            client
                .get_server_logs(5, &LogOptions::new().file(true).raw(true))
                .await
                .unwrap(),
            json!(["line 2"])
        );
    }

    #[tokio::test]
    async fn test_server_sub_resources() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/servers/4/public",
            ok_body(json!({"server_name": "hub"})),
        );
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/servers/4/stats",
            ok_body(json!({"running": false})),
        );
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/servers/4/users",
            ok_body(json!([1])),
        );
        expect(
            &mut mock,
            Method::GET,
            "/api/v2/servers",
            ok_body(json!([{"server_id": 4}])),
        );
        let client = client(mock);

        assert_eq!(
            client.get_server_public_data(4).await.unwrap()["server_name"],
            "hub"
        );
        assert_eq!(
            client.get_server_stats("4").await.unwrap()["running"],
            false
        );
        assert_eq!(client.get_server_users(4).await.unwrap(), json!([1]));
        assert_eq!(
            client.get_all_servers().await.unwrap(),
            json!([{"server_id": 4}])
        );
    }

    #[tokio::test]
    async fn test_delete_missing_server() {
        let mut mock = MockTransport::new();
        expect(
            &mut mock,
            Method::DELETE,
            "/api/v2/servers/404",
            json!({"status": "error", "error": "NOT_FOUND", "info": "no such server"}).to_string(),
        );

        let err = client(mock).delete_server(404).await.unwrap_err();
        assert_eq!(err.panel_kind(), Some(PanelErrorKind::ServerNotFound));
    }
}
