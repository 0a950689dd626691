//! Device identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a simulated radio endpoint
///
/// Ids are dense (`0..devices`) and assigned by the surrounding simulator;
/// the registry never allocates or reclaims them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u32);

impl DeviceId {
    /// Get the raw id value
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Slot index backing this device
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        DeviceId(index as u32)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DeviceId {
    fn from(id: u32) -> Self {
        DeviceId(id)
    }
}
