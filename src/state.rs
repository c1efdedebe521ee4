use crate::config::ServerConfig;
use crate::graph::GraphClient;
use anyhow::Result;
use std::sync::Arc;

pub struct AppState {
    config: Arc<ServerConfig>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> Arc<ServerConfig> {
        self.config.clone()
    }

    /// Acquire a Graph client for one copy operation. Tokens are short-lived
    /// and copies are infrequent, so no token cache is kept; each invocation
    /// owns its own authenticated client.
    pub async fn graph_client(&self) -> Result<GraphClient> {
        GraphClient::connect(
            self.http.clone(),
            &self.config.endpoints,
            &self.config.credentials,
        )
        .await
    }
}
