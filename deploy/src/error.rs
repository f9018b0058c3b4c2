use crate::address::{Address, InvalidAddress};

/// Everything that can go wrong between reading the invocation environment
/// and confirming the deployed contract.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Raised during configuration resolution, before any on-chain side
    /// effect. There is no fallback configuration for unknown networks.
    #[error("unsupported network: {0:?}")]
    UnsupportedNetwork(String),

    #[error("system wallet requires {required} accounts, the network provided {available}")]
    MissingSystemWallet { required: usize, available: usize },

    #[error("the node exposes no accounts to deploy from")]
    NoAccounts,

    #[error("{contract} is already deployed on network {network_id} and overwrite is disabled")]
    AlreadyDeployed { contract: String, network_id: String },

    #[error("{contract} has no deployment recorded for network {network_id}")]
    NotDeployed { contract: String, network_id: String },

    #[error("{contract} at {address} holds no code on chain")]
    EmptyCode { contract: String, address: Address },

    #[error("node rejected request ({code}): {message}")]
    Node { code: i64, message: String },

    #[error("malformed bytecode in artifact {contract}: {reason}")]
    BadBytecode { contract: String, reason: String },

    #[error("transaction {hash} was not mined before the receipt poll gave up")]
    ReceiptTimeout { hash: String },

    #[error(transparent)]
    Address(#[from] InvalidAddress),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
