use thiserror::Error;

use crate::config::ConfigError;
use crate::mime::RuleError;
use crate::registry::RegistryError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
