//! Error types for PHY interface records

use thiserror::Error;

/// Errors raised while building or converting interface records
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    /// Frequency cannot be represented in the requested format
    #[error("invalid frequency: {mhz} MHz ({reason})")]
    InvalidFrequency { mhz: f64, reason: &'static str },

    /// Power level cannot be represented as 8.8 fixed point dBm
    #[error("power level out of range: {0} dBm")]
    PowerOutOfRange(f64),

    /// Unknown RX status code
    #[error("unknown rx status code: {0}")]
    UnknownRxStatus(u8),
}
