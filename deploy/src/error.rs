use thiserror::Error;

use crate::contracts::ContractVariant;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("missing configuration value `{key}`")]
    MissingArgument { key: String },

    #[error("`{key}` is not a valid {expected}: {value:?}")]
    InvalidArgumentFormat {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("failed to load contract artifact {name}")]
    Artifact {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("deployment of {variant} failed")]
    Deployment {
        variant: ContractVariant,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
