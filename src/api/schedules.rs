//! Scheduled task endpoints, nested under a server.

use super::client::CraftyClient;
use super::envelope::Envelope;
use super::routes;
use super::transport::Transport;
use crate::error::{Error, Result};
use crate::types::ResourceId;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// Task payloads are passed through as-is but must be JSON objects.
fn task_body(task: &Value) -> Result<Value> {
    if task.is_object() {
        Ok(task.clone())
    } else {
        Err(Error::type_mismatch("data", "dict", task))
    }
}

impl<T: Transport> CraftyClient<T> {
    pub async fn create_schedule(
        &self,
        server_id: impl Into<ResourceId>,
        task: &Value,
    ) -> Result<Envelope> {
        let body = task_body(task)?;
        self.request(
            Method::POST,
            &routes::server_resource(&server_id.into(), "tasks")?,
            &[],
            Self::json(body),
        )
        .await
    }

    pub async fn modify_schedule(
        &self,
        server_id: impl Into<ResourceId>,
        task_id: impl Into<ResourceId>,
        task: &Value,
    ) -> Result<Envelope> {
        let body = task_body(task)?;
        self.request(
            Method::PATCH,
            &routes::server_task(&server_id.into(), &task_id.into())?,
            &[],
            Self::json(body),
        )
        .await
    }

    pub async fn remove_schedule(
        &self,
        server_id: impl Into<ResourceId>,
        task_id: impl Into<ResourceId>,
    ) -> Result<Envelope> {
        let task_id = task_id.into();
        let response = self
            .request(
                Method::DELETE,
                &routes::server_task(&server_id.into(), &task_id)?,
                &[],
                None,
            )
            .await?;
        if response.is_ok() {
            info!(%task_id, "Successfully removed schedule");
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::test_support::*;
    use crate::api::transport::MockTransport;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_schedule() {
        let task = json!({"name": "nightly backup", "action": "backup", "interval_type": "days"});
        let mut mock = MockTransport::new();
        expect_json(
            &mut mock,
            Method::POST,
            "/api/v2/servers/1/tasks",
            task.clone(),
            ok_body(json!({"schedule_id": 12})),
        );

        let env = client(mock).create_schedule(1, &task).await.unwrap();
        assert_eq!(env.into_data(), json!({"schedule_id": 12}));
    }

    #[tokio::test]
    async fn test_modify_and_remove_schedule() {
        let patch = json!({"enabled": false});
        let mut mock = MockTransport::new();
        expect_json(
            &mut mock,
            Method::PATCH,
            "/api/v2/servers/1/tasks/12",
            patch.clone(),
            ok_body(json!(null)),
        );
        expect(
            &mut mock,
            Method::DELETE,
            "/api/v2/servers/1/tasks/12",
            ok_body(json!(null)),
        );
        let client = client(mock);

        assert!(
            client
                .modify_schedule("1", 12, &patch)
                .await
                .unwrap()
                .is_ok()
        );
        assert!(client.remove_schedule(1, "12").await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_non_object_task_is_rejected() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let err = client(mock)
            .create_schedule(1, &json!("backup"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
