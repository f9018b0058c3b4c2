//! In-memory deployer used by the integration tests: records every call in
//! order and can be told to reject a chosen step.

use anyhow::anyhow;
use async_trait::async_trait;

use crate::address::Address;
use crate::deployer::{
    ConstructorArgs, ContractArtifact, DeployOptions, DeployedInstance, Deployer,
};
use crate::error::DeployError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployerEvent {
    Link {
        library: ContractArtifact,
        target: ContractArtifact,
    },
    Deploy {
        target: ContractArtifact,
        args: ConstructorArgs,
        options: DeployOptions,
    },
    Deployed {
        target: ContractArtifact,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Link,
    Deploy,
    Deployed,
}

pub struct RecordingDeployer {
    events: Vec<DeployerEvent>,
    fail_at: Option<FailAt>,
    instance_address: Address,
}

impl RecordingDeployer {
    pub fn new() -> RecordingDeployer {
        RecordingDeployer {
            events: Vec::new(),
            fail_at: None,
            instance_address: Address([0xde; 20]),
        }
    }

    pub fn failing_at(step: FailAt) -> RecordingDeployer {
        RecordingDeployer {
            fail_at: Some(step),
            ..RecordingDeployer::new()
        }
    }

    pub fn events(&self) -> &[DeployerEvent] {
        &self.events
    }

    pub fn instance_address(&self) -> Address {
        self.instance_address
    }

    fn linked(&self, target: ContractArtifact) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, DeployerEvent::Link { target: t, .. } if *t == target))
    }

    fn deployed_target(&self, target: ContractArtifact) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, DeployerEvent::Deploy { target: t, .. } if *t == target))
    }
}

impl Default for RecordingDeployer {
    fn default() -> Self {
        RecordingDeployer::new()
    }
}

#[async_trait]
impl Deployer for RecordingDeployer {
    async fn link(
        &mut self,
        library: ContractArtifact,
        target: ContractArtifact,
    ) -> Result<(), DeployError> {
        self.events.push(DeployerEvent::Link { library, target });
        if self.fail_at == Some(FailAt::Link) {
            return Err(DeployError::Backend(anyhow!("link step rejected")));
        }
        Ok(())
    }

    async fn deploy(
        &mut self,
        target: ContractArtifact,
        args: ConstructorArgs,
        options: DeployOptions,
    ) -> Result<(), DeployError> {
        if !self.linked(target) {
            return Err(DeployError::Backend(anyhow!(
                "deploy called for {} before link",
                target.name()
            )));
        }
        self.events.push(DeployerEvent::Deploy {
            target,
            args,
            options,
        });
        if self.fail_at == Some(FailAt::Deploy) {
            return Err(DeployError::Backend(anyhow!("deploy step rejected")));
        }
        Ok(())
    }

    async fn deployed(
        &mut self,
        target: ContractArtifact,
    ) -> Result<DeployedInstance, DeployError> {
        self.events.push(DeployerEvent::Deployed { target });
        if self.fail_at == Some(FailAt::Deployed) {
            return Err(DeployError::Backend(anyhow!("confirmation step rejected")));
        }
        if !self.deployed_target(target) {
            return Err(DeployError::NotDeployed {
                contract: target.name().to_string(),
                network_id: "recording".to_string(),
            });
        }
        Ok(DeployedInstance {
            contract: target,
            address: self.instance_address,
        })
    }
}
