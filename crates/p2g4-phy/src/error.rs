//! Error types for the PHY core

use thiserror::Error;

use crate::device::DeviceId;

/// Errors that can occur in the pending transmission registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhyError {
    /// A registry must hold at least one device slot
    #[error("device table needs at least one device")]
    NoDevices,

    /// Device id is not backed by a slot
    #[error("device {device} out of range: table holds {devices} devices")]
    DeviceOutOfRange {
        /// Offending device
        device: DeviceId,
        /// Table capacity
        devices: u32,
    },
}
