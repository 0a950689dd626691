//! Replay event stream
//!
//! Every registry call and RX evaluation performed by the replayer is
//! buffered as a [`PhyEvent`] so observers see one consistently ordered
//! stream.

use p2g4_phy::DeviceId;
use p2g4_protocol::{CombinedTx, VirtualTime};
use serde::Serialize;

/// Result of evaluating one RX attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RxOutcome {
    /// Receiving device
    pub receiver: DeviceId,
    /// Virtual time of the evaluation
    pub time: VirtualTime,
    /// Transmitter the receiver locked onto, if any
    pub matched: Option<DeviceId>,
    /// Registry change counter at evaluation time
    pub registry_version: u64,
}

/// Registry activity observed during replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhyEvent {
    /// A transmission was registered, normalised to the combined record
    Registered {
        device: DeviceId,
        tx: CombinedTx,
        payload_len: usize,
    },
    /// A transmission went on air
    Activated { device: DeviceId },
    /// A transmission ended and its payload was released
    Cleared { device: DeviceId },
    /// An RX attempt was evaluated
    RxEvaluated(RxOutcome),
}

impl PhyEvent {
    /// Device the event concerns (the receiver for RX evaluations)
    pub fn device(&self) -> DeviceId {
        match self {
            Self::Registered { device, .. }
            | Self::Activated { device }
            | Self::Cleared { device } => *device,
            Self::RxEvaluated(outcome) => outcome.receiver,
        }
    }
}
