use std::process::ExitCode;

use ethers::utils::to_checksum;

use crate::{deploy::DeploymentResult, error::Error};

pub fn success_line(result: &DeploymentResult) -> String {
    format!(
        "{} deployed to {} on network {}",
        result.variant,
        to_checksum(&result.address, None),
        result.network
    )
}

/// The error and its causes on one line.
pub fn failure_message(err: impl Into<anyhow::Error>) -> String {
    format!("Error: {:#}", err.into())
}

pub fn exit_status<T>(outcome: &Result<T, Error>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

pub fn report(outcome: Result<DeploymentResult, Error>) -> ExitCode {
    let status = exit_status(&outcome);
    match outcome {
        Ok(result) => {
            println!("{}", success_line(&result));
            println!("transaction hash:{:?}", result.transaction_hash);
        }
        Err(err) => eprintln!("{}", failure_message(err)),
    }
    ExitCode::from(status)
}

/// Failures before the pipeline starts (unreadable config, bad key or RPC URL).
pub fn setup_failure(err: anyhow::Error) -> ExitCode {
    eprintln!("{}", failure_message(err));
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use ethers::{
        types::{Address, H256},
        utils::hex,
    };

    use super::*;
    use crate::contracts::ContractVariant;

    #[test]
    fn success_format() {
        let result = DeploymentResult {
            network: "optimism-sepolia".to_string(),
            variant: ContractVariant::ProofOfVoteNft,
            address: Address::from_slice(
                &hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap(),
            ),
            transaction_hash: H256::zero(),
        };
        assert_eq!(
            success_line(&result),
            "ProofOfVoteNFT deployed to 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed on network optimism-sepolia"
        );
        let outcome = Ok(result);
        assert_eq!(exit_status(&outcome), 0);
        report(outcome);
    }

    #[test]
    fn failure_keeps_the_cause_chain() {
        let err = Error::Deployment {
            variant: ContractVariant::Ballot,
            source: anyhow!("execution reverted").context("(code: 3) rpc error"),
        };
        assert_eq!(
            failure_message(err),
            "Error: deployment of Ballot failed: (code: 3) rpc error: execution reverted"
        );
    }

    #[test]
    fn setup_errors_share_the_format() {
        let err = anyhow!("32 bytes expected").context("reading private key");
        assert_eq!(
            failure_message(err),
            "Error: reading private key: 32 bytes expected"
        );
    }

    #[test]
    fn every_error_kind_fails() {
        let errors = [
            Error::Configuration("no deployment profile for network `x`".to_string()),
            Error::MissingArgument {
                key: "OP_DISPATCHER".to_string(),
            },
            Error::InvalidArgumentFormat {
                key: "OP_DISPATCHER".to_string(),
                value: "0xabc".to_string(),
                expected: "address",
            },
        ];
        for err in errors {
            assert_ne!(exit_status::<()>(&Err(err)), 0);
        }
    }
}
