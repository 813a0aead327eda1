use crate::{
    arguments::{build_arguments, ConfigValues, ConstructorArgs},
    contracts::{Artifacts, ContractArtifact},
    deploy::{execute, ChainClient, DeploymentResult},
    error::Result,
    profile::{DeployConfig, NetworkProfile},
};

/// Everything a deployment needs, resolved and validated without touching the chain.
#[derive(Debug)]
pub struct PreparedDeployment {
    pub profile: NetworkProfile,
    pub args: ConstructorArgs,
    pub artifact: ContractArtifact,
}

pub fn prepare(
    network: &str,
    config: &DeployConfig,
    values: &ConfigValues,
    artifacts: &Artifacts,
) -> Result<PreparedDeployment> {
    let profile = config.resolve(network)?;
    log::info!("network {} deploys {}", network, profile.variant);

    let args = build_arguments(&profile, values)?;
    let artifact = artifacts.load(profile.variant)?;

    Ok(PreparedDeployment {
        profile,
        args,
        artifact,
    })
}

impl PreparedDeployment {
    pub async fn deploy<C>(self, client: &C) -> Result<DeploymentResult>
    where
        C: ChainClient + ?Sized,
    {
        execute(client, &self.profile.network_id, &self.artifact, self.args).await
    }
}
