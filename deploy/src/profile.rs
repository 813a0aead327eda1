use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    contracts::ContractVariant,
    error::{Error, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    pub contract: ContractVariant,
    pub dispatcher_key: String,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// Per-deployment mapping from network name to what gets deployed there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployConfig {
    pub deploy: HashMap<String, NetworkEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub network_id: String,
    pub variant: ContractVariant,
    pub dispatcher_key: String,
    pub chain_id: Option<u64>,
}

impl NetworkProfile {
    /// Configuration keys that feed the constructor, in argument order.
    pub fn required_config_keys(&self) -> Vec<&str> {
        vec![self.dispatcher_key.as_str()]
    }
}

impl DeployConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading deploy config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing deploy config {}", path.display()))
    }

    pub fn resolve(&self, network: &str) -> Result<NetworkProfile> {
        let entry = self.deploy.get(network).ok_or_else(|| {
            Error::Configuration(format!("no deployment profile for network `{network}`"))
        })?;
        if entry.dispatcher_key.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "network `{network}` has an empty dispatcherKey"
            )));
        }

        Ok(NetworkProfile {
            network_id: network.to_string(),
            variant: entry.contract,
            dispatcher_key: entry.dispatcher_key.clone(),
            chain_id: entry.chain_id,
        })
    }
}
