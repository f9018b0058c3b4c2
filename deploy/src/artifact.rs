//! Compiled contract artifacts.
//!
//! Artifacts are the compiler's JSON output: the contract name, the
//! creation bytecode (possibly carrying `__Library...__` placeholders for
//! unlinked libraries), and a per-network record of prior deployments that
//! the backend reads for overwrite decisions and writes back after a
//! successful deploy.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::DeployError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "contractName")]
    pub contract_name: String,
    /// 0x-prefixed creation bytecode hex.
    pub bytecode: String,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub address: Address,
    #[serde(
        rename = "transactionHash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_hash: Option<String>,
}

impl Artifact {
    pub fn path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.json"))
    }

    pub fn load(dir: &Path, name: &str) -> Result<Artifact, DeployError> {
        let raw = fs::read_to_string(Self::path(dir, name))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes the artifact back to `<dir>/<name>.json`. The stem is the
    /// caller's, like in `load`; `contractName` inside the file is not
    /// required to match it.
    pub fn save(&self, dir: &Path, name: &str) -> Result<(), DeployError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(dir, name), raw)?;
        Ok(())
    }

    /// Creation bytecode as raw bytes. Fails if any link placeholder is
    /// still present or the hex is malformed.
    pub fn creation_bytes(&self) -> Result<Vec<u8>, DeployError> {
        bytecode_bytes(&self.contract_name, &self.bytecode)
    }
}

/// Decodes 0x-prefixed creation bytecode, rejecting bytecode that still
/// carries link placeholders.
pub fn bytecode_bytes(contract: &str, bytecode: &str) -> Result<Vec<u8>, DeployError> {
    let digits = bytecode.strip_prefix("0x").unwrap_or(bytecode);
    if digits.contains("__") {
        return Err(DeployError::BadBytecode {
            contract: contract.to_string(),
            reason: "unlinked library placeholder remains".to_string(),
        });
    }
    hex::decode(digits).map_err(|e| DeployError::BadBytecode {
        contract: contract.to_string(),
        reason: e.to_string(),
    })
}

/// Substitutes every placeholder for `library` in `bytecode` with the
/// library's deployed address, returning the linked bytecode and the number
/// of substitutions. Placeholders are `__<name>` padded with underscores to
/// the 40 hex characters the address occupies.
pub fn link_bytecode(bytecode: &str, library: &str, address: &Address) -> (String, usize) {
    let mut placeholder = format!("__{library}");
    placeholder.truncate(40);
    while placeholder.len() < 40 {
        placeholder.push('_');
    }
    let count = bytecode.matches(&placeholder).count();
    (
        bytecode.replace(&placeholder, &hex::encode(address.as_bytes())),
        count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib_address() -> Address {
        "0x1111111111111111111111111111111111111111".parse().unwrap()
    }

    #[test]
    fn links_every_placeholder_occurrence() {
        let placeholder = format!("__SafeMath{}", "_".repeat(30));
        let bytecode = format!("0x6080{placeholder}6040{placeholder}00");
        let (linked, count) = link_bytecode(&bytecode, "SafeMath", &lib_address());
        assert_eq!(count, 2);
        assert_eq!(
            linked,
            format!(
                "0x6080{addr}6040{addr}00",
                addr = "11".repeat(20)
            )
        );
    }

    #[test]
    fn linking_is_a_no_op_without_placeholders() {
        let (linked, count) = link_bytecode("0x60806040", "SafeMath", &lib_address());
        assert_eq!(count, 0);
        assert_eq!(linked, "0x60806040");
    }

    #[test]
    fn creation_bytes_rejects_unlinked_bytecode() {
        let artifact = Artifact {
            contract_name: "TRIBESToken".to_string(),
            bytecode: format!("0x6080__SafeMath{}6040", "_".repeat(30)),
            networks: BTreeMap::new(),
        };
        assert!(matches!(
            artifact.creation_bytes(),
            Err(DeployError::BadBytecode { .. })
        ));
    }

    #[test]
    fn load_save_round_trip_preserves_network_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifact = Artifact {
            contract_name: "TRIBESToken".to_string(),
            bytecode: "0x6080".to_string(),
            networks: BTreeMap::new(),
        };
        artifact.networks.insert(
            "1337".to_string(),
            NetworkRecord {
                address: lib_address(),
                transaction_hash: Some("0xabc".to_string()),
            },
        );
        artifact.save(dir.path(), "TRIBESToken").unwrap();

        let loaded = Artifact::load(dir.path(), "TRIBESToken").unwrap();
        assert_eq!(loaded.contract_name, "TRIBESToken");
        assert_eq!(loaded.networks["1337"].address, lib_address());
        assert_eq!(loaded.networks["1337"].transaction_hash.as_deref(), Some("0xabc"));
    }

    #[test]
    fn save_writes_to_the_caller_supplied_stem() {
        let dir = tempfile::tempdir().unwrap();
        // contractName inside the artifact does not decide the file name
        let artifact = Artifact {
            contract_name: "TRIBESTokenV2".to_string(),
            bytecode: "0x6080".to_string(),
            networks: BTreeMap::new(),
        };
        artifact.save(dir.path(), "TRIBESToken").unwrap();

        assert!(dir.path().join("TRIBESToken.json").exists());
        let loaded = Artifact::load(dir.path(), "TRIBESToken").unwrap();
        assert_eq!(loaded.contract_name, "TRIBESTokenV2");
    }

    #[test]
    fn networks_field_is_optional_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("SafeMath.json"),
            r#"{"contractName":"SafeMath","bytecode":"0x6080"}"#,
        )
        .unwrap();
        let artifact = Artifact::load(dir.path(), "SafeMath").unwrap();
        assert!(artifact.networks.is_empty());
    }
}
