use uuid::Uuid;

use super::Client;
use crate::config::ClientConfig;
use crate::Result;

/// Configurable construction for [`Client`].
pub struct ClientBuilder {
    config: ClientConfig,
    client_id: Option<String>,
}

impl ClientBuilder {
    pub(crate) fn new(endpoint: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                endpoint: endpoint.into(),
                ..ClientConfig::default()
            },
            client_id: None,
        }
    }

    /// Start from an existing configuration section instead of defaults.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        let endpoint = std::mem::take(&mut self.config.endpoint);
        self.config = ClientConfig { endpoint, ..config };
        self
    }

    /// Receive idle threshold; a third of it becomes the heartbeat period.
    pub fn idle_timeout_ms(mut self, idle_timeout_ms: u64) -> Self {
        self.config.idle_timeout_ms = idle_timeout_ms;
        self
    }

    /// Override the session id. Defaults to a random 128-bit id rendered as
    /// text; mostly useful for tests that need two streams to collide.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Dial the endpoint, open the session stream, and start the workers.
    pub async fn build(self) -> Result<Client> {
        self.config.validate()?;
        let client_id = self
            .client_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Client::connect(self.config, client_id).await
    }
}
