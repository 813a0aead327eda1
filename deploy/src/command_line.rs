use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::{
    arguments::ConfigValues,
    contracts::Artifacts,
    deploy::{DeploymentResult, EthersClient},
    error::Error,
    pipeline,
    profile::DeployConfig,
};

#[derive(Debug, Parser)]
pub struct CommandLine {
    #[clap(short, long, env = "NETWORK")]
    network: String,

    #[clap(short, long, env = "DEPLOY_CONFIG", default_value = "deploy.config.json")]
    config: PathBuf,

    #[clap(short, long, env = "ARTIFACTS_DIR", default_value = "artifacts")]
    artifacts: PathBuf,

    #[clap(short, long, env = "RPC_URL")]
    rpc: Option<String>,

    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true)]
    sk: Option<String>,

    /// Send a legacy (pre EIP-1559) transaction.
    #[clap(long)]
    legacy: bool,
}

impl CommandLine {
    /// Setup failures come back as the outer error; the pipeline outcome is
    /// returned as-is for reporting.
    pub async fn execute(self) -> Result<Result<DeploymentResult, Error>> {
        let config = DeployConfig::load(&self.config)?;
        let values = ConfigValues::from_env();
        let artifacts = Artifacts::new(&self.artifacts);

        let prepared = match pipeline::prepare(&self.network, &config, &values, &artifacts) {
            Ok(prepared) => prepared,
            Err(err) => return Ok(Err(err)),
        };

        // Signer inputs are only needed once there is something to deploy.
        let rpc = self.rpc.ok_or(anyhow!("no RPC endpoint, set --rpc or RPC_URL"))?;
        let sk = self
            .sk
            .ok_or(anyhow!("no deployer key, set --sk or PRIVATE_KEY"))?;
        let client = EthersClient::new(&rpc, &sk, prepared.profile.chain_id, self.legacy)?;

        Ok(prepared.deploy(&client).await)
    }
}
