//! PHY core configuration

use serde::{Deserialize, Serialize};

/// Configuration for the pending transmission registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhyConfig {
    /// Number of simulated devices (fixed for the whole run)
    pub devices: u32,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self { devices: 1 }
    }
}
