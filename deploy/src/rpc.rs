//! Minimal JSON-RPC client for the handful of node methods the deployment
//! needs. No batching, no websockets; one request per call against a
//! single HTTP endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::address::Address;
use crate::error::DeployError;

/// Gas limit for creation transactions, matching the development node's
/// default block gas limit.
const DEPLOY_GAS: &str = "0x6691b7";

const RECEIPT_POLL_ATTEMPTS: u32 = 120;
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

// `result` stays a raw Value here: deserializing straight into `Option<T>`
// would collapse a `"result": null` (e.g. a pending transaction receipt)
// into the same shape as a missing result.
#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Receipt {
    #[serde(rename = "contractAddress")]
    pub contract_address: Option<Address>,
    /// "0x1" on success, "0x0" on revert.
    pub status: Option<String>,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> RpcClient {
        RpcClient {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, DeployError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "rpc request");
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(err) = response.error {
            return Err(DeployError::Node {
                code: err.code,
                message: err.message,
            });
        }
        Ok(serde_json::from_value(response.result)?)
    }

    /// Accounts the node controls, in the node's own order.
    pub async fn accounts(&self) -> Result<Vec<Address>, DeployError> {
        self.call("eth_accounts", json!([])).await
    }

    /// The chain's network id, used to key deployment records.
    pub async fn net_version(&self) -> Result<String, DeployError> {
        self.call("net_version", json!([])).await
    }

    /// Submits a contract-creation transaction and returns its hash.
    pub async fn send_creation(&self, from: &Address, data: &[u8]) -> Result<String, DeployError> {
        self.call(
            "eth_sendTransaction",
            json!([{
                "from": from.to_string(),
                "data": format!("0x{}", hex::encode(data)),
                "gas": DEPLOY_GAS,
            }]),
        )
        .await
    }

    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<Receipt>, DeployError> {
        self.call("eth_getTransactionReceipt", json!([hash])).await
    }

    /// Polls until the transaction is mined. Development nodes mine
    /// instantly; the bound keeps a dead node from hanging the process.
    pub async fn wait_for_receipt(&self, hash: &str) -> Result<Receipt, DeployError> {
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(DeployError::ReceiptTimeout {
            hash: hash.to_string(),
        })
    }

    /// Code at `address` in the latest block, as 0x-prefixed hex.
    pub async fn code_at(&self, address: &Address) -> Result<String, DeployError> {
        self.call("eth_getCode", json!([address.to_string(), "latest"]))
            .await
    }
}
