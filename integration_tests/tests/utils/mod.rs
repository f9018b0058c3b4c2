use deploy::address::Address;
use deploy::config::{resolve_config, NetworkContext};
use deploy::deployer::{run_pipeline, DeployedInstance, Deployer};
use deploy::error::DeployError;

pub const DEVELOPMENT: &str = "development";
pub const ACCOUNT_COUNT: usize = 10;

/// Ten distinct addresses A0..A9; account N is the address whose bytes are
/// all N.
pub fn accounts(n: usize) -> Vec<Address> {
    (0..n).map(|i| Address([i as u8; 20])).collect()
}

pub fn development_context() -> NetworkContext {
    NetworkContext {
        network: DEVELOPMENT.to_string(),
        accounts: accounts(ACCOUNT_COUNT),
    }
}

pub fn context(network: &str, account_count: usize) -> NetworkContext {
    NetworkContext {
        network: network.to_string(),
        accounts: accounts(account_count),
    }
}

/// The whole migration as the binary runs it: resolve the configuration,
/// then drive the pipeline. Configuration failures never reach the
/// deployer.
pub async fn migrate<D: Deployer>(
    ctx: &NetworkContext,
    deployer: &mut D,
) -> Result<DeployedInstance, DeployError> {
    let config = resolve_config(ctx)?;
    run_pipeline(&config, deployer).await
}
