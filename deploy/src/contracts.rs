use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Proposal names shared by every ballot deployment, already encoded as
/// `bytes32` ("Polymer brings IBC to Ethereum" / "Polymer brings IBC to all of th").
pub const PROPOSAL_NAMES: [&str; 2] = [
    "0x506f6c796d6572206272696e67732049424320746f20457468657265756d0000",
    "0x506f6c796d6572206272696e67732049424320746f20616c6c206f6620746800",
];

/// Metadata URI minted into every proof-of-vote token.
pub const TOKEN_URI: &str = "https://cdn.discordapp.com/attachments/841255110721929216/1092765295388676146/bc19-4725-b503-d375e88692b3.png?ex=6581777d&is=656f027d&hm=39c445ad33e663dfa03c8c59a7f88a15cd02218490f97c5ec8ed96d11475c184&";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ContractVariant {
    #[serde(alias = "IbcBallot")]
    Ballot,
    #[serde(rename = "ProofOfVoteNFT", alias = "IbcProofOfVoteNFT")]
    ProofOfVoteNft,
}

impl ContractVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ContractVariant::Ballot => "Ballot",
            ContractVariant::ProofOfVoteNft => "ProofOfVoteNFT",
        }
    }

    /// Name of the compiled contract backing this variant.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            ContractVariant::Ballot => "IbcBallot",
            ContractVariant::ProofOfVoteNft => "IbcProofOfVoteNFT",
        }
    }
}

impl fmt::Display for ContractVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Hardhat build artifact. Only the fields needed to deploy are read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Flat layout first, then `contracts/<Name>.sol/<Name>.json`.
    fn candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.dir.join(format!("{name}.json")),
            self.dir
                .join("contracts")
                .join(format!("{name}.sol"))
                .join(format!("{name}.json")),
        ]
    }

    pub fn load(&self, variant: ContractVariant) -> Result<ContractArtifact> {
        let name = variant.artifact_name();
        let load = || -> anyhow::Result<ContractArtifact> {
            let path = self
                .candidates(name)
                .into_iter()
                .find(|path| path.is_file())
                .ok_or(anyhow!("no artifact found under {}", self.dir.display()))?;
            let artifact = read_artifact(&path)?;
            if artifact.bytecode.is_empty() {
                return Err(anyhow!("{} has no bytecode", path.display()));
            }
            Ok(artifact)
        };
        load().map_err(|source| Error::Artifact { name, source })
    }
}

fn read_artifact(path: &Path) -> anyhow::Result<ContractArtifact> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let artifact = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    log::debug!("loaded artifact {}", path.display());
    Ok(artifact)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn artifact_json(name: &str) -> String {
        format!(
            r#"{{
                "_format": "hh-sol-artifact-1",
                "contractName": "{name}",
                "sourceName": "contracts/{name}.sol",
                "abi": [{{
                    "type": "constructor",
                    "stateMutability": "nonpayable",
                    "inputs": [{{ "name": "dispatcher", "type": "address", "internalType": "address" }}]
                }}],
                "bytecode": "0x6080604052",
                "deployedBytecode": "0x6080"
            }}"#
        )
    }

    #[test]
    fn variant_names() {
        assert_eq!(ContractVariant::Ballot.to_string(), "Ballot");
        assert_eq!(ContractVariant::ProofOfVoteNft.to_string(), "ProofOfVoteNFT");
        assert_eq!(ContractVariant::ProofOfVoteNft.artifact_name(), "IbcProofOfVoteNFT");
    }

    #[test]
    fn variant_accepts_artifact_names() {
        let variant: ContractVariant = serde_json::from_str("\"IbcBallot\"").unwrap();
        assert_eq!(variant, ContractVariant::Ballot);
        let variant: ContractVariant = serde_json::from_str("\"ProofOfVoteNFT\"").unwrap();
        assert_eq!(variant, ContractVariant::ProofOfVoteNft);
        assert!(serde_json::from_str::<ContractVariant>("\"ballot\"").is_err());
    }

    #[test]
    fn loads_flat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("IbcBallot.json"), artifact_json("IbcBallot")).unwrap();

        let artifact = Artifacts::new(dir.path())
            .load(ContractVariant::Ballot)
            .unwrap();
        assert_eq!(artifact.contract_name, "IbcBallot");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact.abi.constructor().is_some());
    }

    #[test]
    fn loads_hardhat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("contracts").join("IbcProofOfVoteNFT.sol");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            nested.join("IbcProofOfVoteNFT.json"),
            artifact_json("IbcProofOfVoteNFT"),
        )
        .unwrap();

        let artifact = Artifacts::new(dir.path())
            .load(ContractVariant::ProofOfVoteNft)
            .unwrap();
        assert_eq!(artifact.contract_name, "IbcProofOfVoteNFT");
    }

    #[test]
    fn missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = Artifacts::new(dir.path())
            .load(ContractVariant::Ballot)
            .unwrap_err();
        assert!(matches!(err, Error::Artifact { name: "IbcBallot", .. }));
    }

    #[test]
    fn artifact_without_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        let json = artifact_json("IbcBallot").replace("0x6080604052", "0x");
        fs::write(dir.path().join("IbcBallot.json"), json).unwrap();
        assert!(Artifacts::new(dir.path())
            .load(ContractVariant::Ballot)
            .is_err());
    }
}
