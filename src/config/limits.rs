use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Namespace limits enforced by the tree store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LimitsConfig {
    /// Maximum node payload size in bytes.
    /// Default: 1 MiB
    #[serde(default = "default_max_data_bytes")]
    pub max_data_bytes: usize,

    /// Maximum number of name components in a path.
    /// Default: 128
    #[serde(default = "default_max_path_depth")]
    pub max_path_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_data_bytes: default_max_data_bytes(),
            max_path_depth: default_max_path_depth(),
        }
    }
}

impl LimitsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_data_bytes == 0 {
            return Err(Error::Config(ConfigError::Message(
                "Max data bytes must be greater than 0".into(),
            )));
        }
        if self.max_path_depth == 0 {
            return Err(Error::Config(ConfigError::Message(
                "Max path depth must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_max_data_bytes() -> usize {
    1_048_576
}
fn default_max_path_depth() -> usize {
    128
}
