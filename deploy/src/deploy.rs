use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::{
    abi::Token,
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, JsonRpcClient, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{
        transaction::eip2718::TypedTransaction, Address, Eip1559TransactionRequest, TransactionReceipt, TransactionRequest,
        H256,
    },
    utils::hex,
};

use crate::{
    arguments::ConstructorArgs,
    contracts::{ContractArtifact, ContractVariant},
    error::Error,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub transaction_hash: H256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub network: String,
    pub variant: ContractVariant,
    pub address: Address,
    pub transaction_hash: H256,
}

/// Something that can sign, submit and confirm a contract creation.
#[async_trait]
pub trait ChainClient {
    async fn deploy(&self, artifact: &ContractArtifact, args: Vec<Token>)
        -> Result<DeployedContract>;
}

/// Submits exactly one deployment; failures are never retried.
pub async fn execute<C>(
    client: &C,
    network: &str,
    artifact: &ContractArtifact,
    args: ConstructorArgs,
) -> Result<DeploymentResult, Error>
where
    C: ChainClient + ?Sized,
{
    let variant = args.variant();
    log::info!(
        "deploying {} ({}) on network {}",
        variant,
        artifact.contract_name,
        network
    );

    let deployed = client
        .deploy(artifact, args.into_tokens())
        .await
        .map_err(|source| Error::Deployment { variant, source })?;

    Ok(DeploymentResult {
        network: network.to_string(),
        variant,
        address: deployed.address,
        transaction_hash: deployed.transaction_hash,
    })
}

pub struct EthersClient<P = Http> {
    provider: Provider<P>,
    wallet: LocalWallet,
    chain_id: Option<u64>,
    legacy: bool,
}

impl EthersClient {
    /// Makes no RPC calls; the chain id is looked up on first use when not given.
    pub fn new(rpc: &str, sk: &str, chain_id: Option<u64>, legacy: bool) -> Result<Self> {
        let key = hex::decode(sk.strip_prefix("0x").unwrap_or(sk))?;
        if key.len() != 32 {
            return Err(anyhow!(
                "private key must be 32 bytes, got {} bytes",
                key.len()
            ));
        }
        let wallet = LocalWallet::from_bytes(&key)?;
        let provider = Provider::<Http>::try_from(rpc)?;

        Ok(Self::with_provider(provider, wallet, chain_id, legacy))
    }
}

impl<P: JsonRpcClient + Clone + 'static> EthersClient<P> {
    pub fn with_provider(
        provider: Provider<P>,
        wallet: LocalWallet,
        chain_id: Option<u64>,
        legacy: bool,
    ) -> Self {
        Self {
            provider,
            wallet,
            chain_id,
            legacy,
        }
    }

    pub fn deployer(&self) -> Address {
        self.wallet.address()
    }

    async fn chain_id(&self) -> Result<u64> {
        match self.chain_id {
            Some(chain_id) => Ok(chain_id),
            None => {
                let chain_id = self.provider.get_chainid().await?.as_u64();
                log::debug!("chain id from rpc: {}", chain_id);
                Ok(chain_id)
            }
        }
    }

    async fn client(&self) -> Result<Arc<SignerMiddleware<Provider<P>, LocalWallet>>> {
        let chain_id = self.chain_id().await?;

        Ok(Arc::new(SignerMiddleware::new(
            self.provider.clone(),
            self.wallet.clone().with_chain_id(chain_id),
        )))
    }

    /// Downgrades an EIP-1559 request to a legacy one when asked to.
    fn apply_tx_type(&self, tx: &mut TypedTransaction) {
        if !self.legacy {
            return;
        }
        if let TypedTransaction::Eip1559(inner) = tx {
            *tx = TypedTransaction::Legacy(<TransactionRequest as From<Eip1559TransactionRequest>>::from(inner.clone()));
        }
    }
}

fn check_receipt(receipt: &TransactionReceipt) -> Result<()> {
    if receipt.status.map_or(false, |status| status.is_zero()) {
        return Err(anyhow!(
            "deployment transaction {:?} reverted",
            receipt.transaction_hash
        ));
    }
    Ok(())
}

#[async_trait]
impl<P: JsonRpcClient + Clone + 'static> ChainClient for EthersClient<P> {
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: Vec<Token>,
    ) -> Result<DeployedContract> {
        log::info!("deploying contracts with the account: {:?}", self.deployer());
        let client = self.client().await?;

        let mut deployer = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            client,
        )
        .deploy_tokens(args)?
        .confirmations(1usize);
        self.apply_tx_type(&mut deployer.tx);

        let (contract, receipt) = deployer.send_with_receipt().await?;
        log::info!("transaction hash:{:?}", receipt.transaction_hash);
        check_receipt(&receipt)?;

        Ok(DeployedContract {
            address: contract.address(),
            transaction_hash: receipt.transaction_hash,
        })
    }
}
