//! Client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};

/// Configuration for [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Page size for collections whose query sets no limit.
    pub default_limit: i64,
    /// Keep fetched definitions for the lifetime of the client.
    pub cache_definitions: bool,
    /// Buffered events per subscriber before the slowest one lags.
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            cache_definitions: true,
            event_capacity: 64,
        }
    }
}

impl ClientConfig {
    /// Parses a (possibly partial) JSON config; missing keys take defaults.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.default_limit <= 0 {
            return Err(ClientError::Config(format!(
                "default_limit must be positive, got {}",
                self.default_limit
            )));
        }
        if self.event_capacity == 0 {
            return Err(ClientError::Config("event_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
