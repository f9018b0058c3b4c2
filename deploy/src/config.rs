use crate::address::Address;
use crate::error::DeployError;

pub const TOKEN_NAME: &str = "TRIBES";
pub const TOKEN_SYMBOL: &str = "TRBX";

/// The account granted the system role by the token constructor, by fixed
/// position in the node's account list.
pub const SYSTEM_WALLET_INDEX: usize = 7;

/// Networks this migration knows how to deploy to. Adding a network means
/// adding a variant here and deciding its parameters in `resolve_config`;
/// an unknown name never falls back to development parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Development,
}

impl Network {
    pub fn from_name(name: &str) -> Result<Network, DeployError> {
        match name {
            "development" => Ok(Network::Development),
            other => Err(DeployError::UnsupportedNetwork(other.to_string())),
        }
    }

    fn overwrite(&self) -> bool {
        match self {
            Network::Development => true,
        }
    }
}

/// The invocation environment: target network name plus the ordered account
/// list the node exposes. Read-only for the duration of one run.
#[derive(Debug, Clone)]
pub struct NetworkContext {
    pub network: String,
    pub accounts: Vec<Address>,
}

/// Fully resolved deployment parameters. Built once, never mutated; the
/// deployer backend only ever sees a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub token_name: String,
    pub token_symbol: String,
    pub system_wallet: Address,
    pub overwrite: bool,
}

/// Maps the invocation environment to deployment parameters. Pure; fails
/// before any backend interaction when the network is unknown or the
/// account list is too short to contain the system wallet.
pub fn resolve_config(ctx: &NetworkContext) -> Result<DeploymentConfig, DeployError> {
    let network = Network::from_name(&ctx.network)?;
    let system_wallet = ctx
        .accounts
        .get(SYSTEM_WALLET_INDEX)
        .copied()
        .ok_or(DeployError::MissingSystemWallet {
            required: SYSTEM_WALLET_INDEX + 1,
            available: ctx.accounts.len(),
        })?;
    Ok(DeploymentConfig {
        token_name: TOKEN_NAME.to_string(),
        token_symbol: TOKEN_SYMBOL.to_string(),
        system_wallet,
        overwrite: network.overwrite(),
    })
}

/// The account deployment transactions are sent from: the first account
/// the node exposes.
pub fn deployer_account(ctx: &NetworkContext) -> Result<Address, DeployError> {
    ctx.accounts.first().copied().ok_or(DeployError::NoAccounts)
}
