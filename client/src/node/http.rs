//! [`TezosNode`] over the node's HTTP JSON RPC.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{NodeError, TezosNode};
use crate::config::NodeConfig;
use crate::operation::{
    Account, AppliedOperationPayload, AppliedOperationResult, BlockHead, ManagerKey,
    UnsignedOperationGroup,
};

/// HTTP client for a single node.
#[derive(Debug, Clone)]
pub struct HttpNode {
    client: Client,
    base_url: String,
}

impl HttpNode {
    /// Build a client for the node described by `config`.
    pub fn new(config: &NodeConfig) -> Result<Self, NodeError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Node base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, NodeError> {
        debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, NodeError> {
        debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, NodeError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| NodeError::InvalidResponse(e.to_string()))
    }
}

/// Manager key responses come in three shapes depending on protocol
/// version: `null`, a bare key string, or `{manager, key}`.
pub(crate) fn parse_manager_key(value: Value) -> Result<ManagerKey, NodeError> {
    match value {
        Value::Null => Ok(ManagerKey::default()),
        Value::String(key) => Ok(ManagerKey {
            manager: None,
            key: Some(key),
        }),
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| NodeError::InvalidResponse(e.to_string()))
        }
        other => Err(NodeError::InvalidResponse(format!(
            "unexpected manager key response: {}",
            other
        ))),
    }
}

#[async_trait]
impl TezosNode for HttpNode {
    async fn get_block_head(&self, network: &str) -> Result<BlockHead, NodeError> {
        self.get(&format!("/chains/{}/blocks/head", network)).await
    }

    async fn get_account_for_block(
        &self,
        network: &str,
        block_hash: &str,
        account_id: &str,
    ) -> Result<Account, NodeError> {
        self.get(&format!(
            "/chains/{}/blocks/{}/context/contracts/{}",
            network, block_hash, account_id
        ))
        .await
    }

    async fn get_account_manager_for_block(
        &self,
        network: &str,
        block_hash: &str,
        account_id: &str,
    ) -> Result<ManagerKey, NodeError> {
        let value: Value = self
            .get(&format!(
                "/chains/{}/blocks/{}/context/contracts/{}/manager_key",
                network, block_hash, account_id
            ))
            .await?;
        parse_manager_key(value)
    }

    async fn forge_operation(
        &self,
        network: &str,
        group: &UnsignedOperationGroup,
    ) -> Result<String, NodeError> {
        self.post(
            &format!("/chains/{}/blocks/head/helpers/forge/operations", network),
            group,
        )
        .await
    }

    async fn apply_operation(
        &self,
        network: &str,
        payload: &[AppliedOperationPayload],
    ) -> Result<Vec<AppliedOperationResult>, NodeError> {
        self.post(
            &format!("/chains/{}/blocks/head/helpers/preapply/operations", network),
            payload,
        )
        .await
    }

    async fn inject_operation(&self, network: &str, signed_hex: &str) -> Result<String, NodeError> {
        self.post(&format!("/injection/operation?chain={}", network), signed_hex)
            .await
    }
}
