//! JSON schema endpoint.

use super::client::CraftyClient;
use super::envelope::Envelope;
use super::routes;
use super::transport::Transport;
use crate::error::Result;
use crate::types::Schema;
use reqwest::Method;

impl<T: Transport> CraftyClient<T> {
    /// Fetch the JSON schema the panel validates a request body against.
    pub async fn json_schema(&self, schema: Schema) -> Result<Envelope> {
        self.request(Method::GET, &routes::schema(schema), &[], None)
            .await
    }
}
