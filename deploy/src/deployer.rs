use async_trait::async_trait;
use tracing::info;

use crate::address::Address;
use crate::config::DeploymentConfig;
use crate::error::DeployError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractArtifact {
    SafeMath,
    TribesToken,
}

impl ContractArtifact {
    /// Artifact file stem under the artifacts directory.
    pub fn name(&self) -> &str {
        match self {
            ContractArtifact::SafeMath => "SafeMath",
            ContractArtifact::TribesToken => "TRIBESToken",
        }
    }
}

/// Constructor arguments for the token contract, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorArgs {
    pub token_name: String,
    pub token_symbol: String,
    pub system_wallet: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    pub overwrite: bool,
}

/// Handle to a confirmed on-chain instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedInstance {
    pub contract: ContractArtifact,
    pub address: Address,
}

/// The deployment backend. Implementations own all chain interaction and
/// the record of what is deployed where; the pipeline only sequences them.
///
/// `deploy` must not be called for a target that has not been linked in the
/// same session: an unlinked artifact still carries library placeholders in
/// its bytecode.
#[async_trait]
pub trait Deployer {
    async fn link(
        &mut self,
        library: ContractArtifact,
        target: ContractArtifact,
    ) -> Result<(), DeployError>;

    async fn deploy(
        &mut self,
        target: ContractArtifact,
        args: ConstructorArgs,
        options: DeployOptions,
    ) -> Result<(), DeployError>;

    async fn deployed(
        &mut self,
        target: ContractArtifact,
    ) -> Result<DeployedInstance, DeployError>;
}

/// Runs the migration against a resolved configuration: link SafeMath into
/// the token, deploy it, then confirm the instance materialized. Each step
/// is awaited to completion before the next starts, and the first failure
/// aborts the rest of the sequence.
pub async fn run_pipeline<D>(
    config: &DeploymentConfig,
    deployer: &mut D,
) -> Result<DeployedInstance, DeployError>
where
    D: Deployer + ?Sized,
{
    info!("linking SafeMath into TRIBESToken");
    deployer
        .link(ContractArtifact::SafeMath, ContractArtifact::TribesToken)
        .await?;

    info!(
        name = %config.token_name,
        symbol = %config.token_symbol,
        system_wallet = %config.system_wallet,
        overwrite = config.overwrite,
        "deploying TRIBESToken"
    );
    deployer
        .deploy(
            ContractArtifact::TribesToken,
            ConstructorArgs {
                token_name: config.token_name.clone(),
                token_symbol: config.token_symbol.clone(),
                system_wallet: config.system_wallet,
            },
            DeployOptions {
                overwrite: config.overwrite,
            },
        )
        .await?;

    let instance = deployer.deployed(ContractArtifact::TribesToken).await?;
    info!(address = %instance.address, "TRIBESToken confirmed on chain");
    Ok(instance)
}
