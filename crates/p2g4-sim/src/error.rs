//! Error types for scenario replay

use p2g4_protocol::VirtualTime;
use thiserror::Error;

/// Errors that can occur while loading or replaying a scenario
#[derive(Debug, Error)]
pub enum SimError {
    /// Registry rejected an operation
    #[error("phy error: {0}")]
    Phy(#[from] p2g4_phy::PhyError),

    /// Record could not be normalised
    #[error("protocol error: {0}")]
    Protocol(#[from] p2g4_protocol::ProtocolError),

    /// Access address does not fit the 32 bit slot descriptor
    #[error("phy address 0x{0:X} does not fit in 32 bits")]
    AddressTooWide(u64),

    /// RX attempts must be evaluated in virtual time order
    #[error("rx at {time} evaluated after rx at {last}")]
    TimeWentBackwards {
        /// Time of the offending RX attempt
        time: VirtualTime,
        /// Time of the previous RX attempt
        last: VirtualTime,
    },

    /// Scenario file is not valid JSON
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
