use std::collections::HashMap;

use ethers::{
    abi::Token,
    types::Address,
    utils::{hex, to_checksum},
};

use crate::{
    contracts::{ContractVariant, PROPOSAL_NAMES, TOKEN_URI},
    error::{Error, Result},
    profile::NetworkProfile,
};

/// Externally supplied values (dispatcher addresses and the like), keyed by
/// configuration key.
#[derive(Debug, Clone, Default)]
pub struct ConfigValues(HashMap<String, String>);

impl ConfigValues {
    pub fn from_env() -> Self {
        Self(
            std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
        )
    }

    /// Present and non-blank, trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingArgument {
            key: key.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorArgs {
    Ballot {
        proposal_names: [[u8; 32]; 2],
        dispatcher: Address,
    },
    ProofOfVoteNft {
        dispatcher: Address,
        token_uri: String,
    },
}

impl ConstructorArgs {
    pub fn variant(&self) -> ContractVariant {
        match self {
            ConstructorArgs::Ballot { .. } => ContractVariant::Ballot,
            ConstructorArgs::ProofOfVoteNft { .. } => ContractVariant::ProofOfVoteNft,
        }
    }

    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            ConstructorArgs::Ballot {
                proposal_names,
                dispatcher,
            } => vec![
                Token::Array(
                    proposal_names
                        .iter()
                        .map(|name| Token::FixedBytes(name.to_vec()))
                        .collect(),
                ),
                Token::Address(dispatcher),
            ],
            ConstructorArgs::ProofOfVoteNft {
                dispatcher,
                token_uri,
            } => vec![Token::Address(dispatcher), Token::String(token_uri)],
        }
    }
}

pub fn build_arguments(profile: &NetworkProfile, values: &ConfigValues) -> Result<ConstructorArgs> {
    for key in profile.required_config_keys() {
        values.require(key)?;
    }
    let dispatcher = parse_address(
        &profile.dispatcher_key,
        values.require(&profile.dispatcher_key)?,
    )?;

    let args = match profile.variant {
        ContractVariant::Ballot => ConstructorArgs::Ballot {
            proposal_names: [
                parse_bytes32("proposal name", PROPOSAL_NAMES[0])?,
                parse_bytes32("proposal name", PROPOSAL_NAMES[1])?,
            ],
            dispatcher,
        },
        ContractVariant::ProofOfVoteNft => ConstructorArgs::ProofOfVoteNft {
            dispatcher,
            token_uri: TOKEN_URI.to_string(),
        },
    };
    log::debug!("{} constructor arguments: {:?}", profile.variant, args);
    Ok(args)
}

/// `0x` plus 40 hex digits. Mixed case must be a valid EIP-55 checksum.
fn parse_address(key: &str, value: &str) -> Result<Address> {
    let invalid = || Error::InvalidArgumentFormat {
        key: key.to_string(),
        value: value.to_string(),
        expected: "address",
    };

    let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let address = Address::from_slice(&hex::decode(digits).map_err(|_| invalid())?);

    let mixed_case = digits.chars().any(|c| c.is_ascii_uppercase())
        && digits.chars().any(|c| c.is_ascii_lowercase());
    if mixed_case && to_checksum(&address, None) != value {
        return Err(invalid());
    }
    Ok(address)
}

fn parse_bytes32(key: &str, value: &str) -> Result<[u8; 32]> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| Error::InvalidArgumentFormat {
            key: key.to_string(),
            value: value.to_string(),
            expected: "bytes32",
        })
}
