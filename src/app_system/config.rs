use clap::Parser;
use thiserror::Error;

/// Startup configuration, read from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "user_router", about = "CRUD request router for users backed by a key-value table")]
pub struct Config {
    /// Region the store lives in
    #[arg(long, env = "AWS_REGION")]
    pub region: String,

    /// Table holding user records
    #[arg(long, env = "TABLE_NAME", default_value = "go-serverless")]
    pub table_name: String,

    /// Capacity of the store's request channel
    #[arg(long, env = "STORE_BUFFER_SIZE", default_value_t = 32)]
    pub buffer_size: usize,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Region must not be empty")]
    MissingRegion,
    #[error("Table name must not be empty")]
    MissingTable,
    #[error("Store buffer size must be greater than zero")]
    ZeroBuffer,
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::MissingRegion);
        }
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::MissingTable);
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBuffer);
        }
        Ok(self)
    }
}
