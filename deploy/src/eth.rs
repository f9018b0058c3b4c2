//! JSON-RPC backed implementation of the [`Deployer`] trait.
//!
//! Deployment records live in the artifact files, keyed by the node's
//! network id, so a rerun against the same node sees what an earlier run
//! deployed.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::address::Address;
use crate::artifact::{self, link_bytecode, Artifact, NetworkRecord};
use crate::deployer::{
    ConstructorArgs, ContractArtifact, DeployOptions, DeployedInstance, Deployer,
};
use crate::encode::encode_constructor_args;
use crate::error::DeployError;
use crate::rpc::RpcClient;

pub struct EthDeployer {
    rpc: RpcClient,
    from: Address,
    artifacts_dir: PathBuf,
    network_id: String,
    /// Linked bytecode per target, produced by `link` and consumed by the
    /// deploy of the same session.
    linked: HashMap<ContractArtifact, String>,
}

impl EthDeployer {
    /// Connects to the node behind `rpc` and keys all deployment records by
    /// its reported network id.
    pub async fn connect(
        rpc: RpcClient,
        from: Address,
        artifacts_dir: PathBuf,
    ) -> Result<EthDeployer, DeployError> {
        let network_id = rpc.net_version().await?;
        info!(%network_id, %from, "connected to node");
        Ok(Self::with_network_id(rpc, from, artifacts_dir, network_id))
    }

    pub fn with_network_id(
        rpc: RpcClient,
        from: Address,
        artifacts_dir: PathBuf,
        network_id: String,
    ) -> EthDeployer {
        EthDeployer {
            rpc,
            from,
            artifacts_dir,
            network_id,
            linked: HashMap::new(),
        }
    }

    fn artifact(&self, contract: ContractArtifact) -> Result<Artifact, DeployError> {
        Artifact::load(&self.artifacts_dir, contract.name())
    }

    /// Submits a creation transaction and waits for it to mine.
    async fn submit(&self, data: Vec<u8>) -> Result<(Address, String), DeployError> {
        let hash = self.rpc.send_creation(&self.from, &data).await?;
        let receipt = self.rpc.wait_for_receipt(&hash).await?;
        if receipt.status.as_deref() == Some("0x0") {
            return Err(DeployError::Backend(anyhow!(
                "creation transaction {hash} reverted"
            )));
        }
        let address = receipt
            .contract_address
            .ok_or_else(|| DeployError::Backend(anyhow!("receipt {hash} has no contract address")))?;
        Ok((address, hash))
    }

    /// Returns the library's address on this network, deploying it first if
    /// no recorded instance is still live.
    async fn ensure_library(&self, library: ContractArtifact) -> Result<Address, DeployError> {
        let mut art = self.artifact(library)?;
        if let Some(record) = art.networks.get(&self.network_id) {
            let code = self.rpc.code_at(&record.address).await?;
            if !code_is_empty(&code) {
                info!(library = library.name(), address = %record.address, "reusing deployed library");
                return Ok(record.address);
            }
            warn!(
                library = library.name(),
                address = %record.address,
                "recorded library instance holds no code, redeploying"
            );
        }
        info!(library = library.name(), "deploying library");
        let (address, hash) = self.submit(art.creation_bytes()?).await?;
        art.networks.insert(
            self.network_id.clone(),
            NetworkRecord {
                address,
                transaction_hash: Some(hash),
            },
        );
        art.save(&self.artifacts_dir, library.name())?;
        Ok(address)
    }
}

#[async_trait]
impl Deployer for EthDeployer {
    async fn link(
        &mut self,
        library: ContractArtifact,
        target: ContractArtifact,
    ) -> Result<(), DeployError> {
        let library_address = self.ensure_library(library).await?;
        let target_artifact = self.artifact(target)?;
        let (linked, substitutions) =
            link_bytecode(&target_artifact.bytecode, library.name(), &library_address);
        if substitutions == 0 {
            warn!(
                library = library.name(),
                target = target.name(),
                "bytecode references no link placeholders for this library"
            );
        }
        info!(
            library = library.name(),
            target = target.name(),
            %library_address,
            substitutions,
            "linked library into target bytecode"
        );
        self.linked.insert(target, linked);
        Ok(())
    }

    async fn deploy(
        &mut self,
        target: ContractArtifact,
        args: ConstructorArgs,
        options: DeployOptions,
    ) -> Result<(), DeployError> {
        let mut art = self.artifact(target)?;
        if !options.overwrite && art.networks.contains_key(&self.network_id) {
            return Err(DeployError::AlreadyDeployed {
                contract: target.name().to_string(),
                network_id: self.network_id.clone(),
            });
        }

        let bytecode = match self.linked.remove(&target) {
            Some(linked) => artifact::bytecode_bytes(target.name(), &linked)?,
            None => art.creation_bytes()?,
        };
        let mut data = bytecode;
        data.extend_from_slice(&encode_constructor_args(
            &args.token_name,
            &args.token_symbol,
            &args.system_wallet,
        ));

        let (address, hash) = self.submit(data).await?;
        info!(contract = target.name(), %address, tx = %hash, "contract deployed");
        art.networks.insert(
            self.network_id.clone(),
            NetworkRecord {
                address,
                transaction_hash: Some(hash),
            },
        );
        art.save(&self.artifacts_dir, target.name())?;
        Ok(())
    }

    async fn deployed(
        &mut self,
        target: ContractArtifact,
    ) -> Result<DeployedInstance, DeployError> {
        let art = self.artifact(target)?;
        let record =
            art.networks
                .get(&self.network_id)
                .ok_or_else(|| DeployError::NotDeployed {
                    contract: target.name().to_string(),
                    network_id: self.network_id.clone(),
                })?;
        let code = self.rpc.code_at(&record.address).await?;
        if code_is_empty(&code) {
            return Err(DeployError::EmptyCode {
                contract: target.name().to_string(),
                address: record.address,
            });
        }
        Ok(DeployedInstance {
            contract: target,
            address: record.address,
        })
    }
}

fn code_is_empty(code: &str) -> bool {
    matches!(code, "" | "0x" | "0x0")
}
