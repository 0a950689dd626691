//! First generation (v1) request and response records
//!
//! Flat records as submitted by devices speaking the first interface
//! generation. The PHY core still matches transmissions against these shapes.

use crate::error::ProtocolError;
use crate::radio::{AbortParams, Power, RadioParams};
use crate::VirtualTime;

/// Transmission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TxRequest {
    /// Time the first bit is on air
    pub start_time: VirtualTime,
    /// Time the last bit is on air
    pub end_time: VirtualTime,
    /// Abort timing
    pub abort: AbortParams,
    /// Access address / sync word
    pub phy_address: u32,
    /// Modulation and channel
    pub radio_params: RadioParams,
    /// Transmit power
    pub power_level: Power,
    /// Payload size in bytes
    pub packet_size: u16,
}

impl TxRequest {
    /// Duration the transmission occupies the air
    pub fn duration(&self) -> VirtualTime {
        self.end_time.saturating_sub(self.start_time)
    }
}

/// Reception request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RxRequest {
    /// Time the receiver starts scanning
    pub start_time: VirtualTime,
    /// How long to scan for a sync word
    pub scan_duration: u32,
    /// Access address / sync word to search for
    pub phy_address: u32,
    /// Modulation and channel
    pub radio_params: RadioParams,
    /// Receiver antenna gain
    pub antenna_gain: Power,
    /// Maximum bit errors tolerated in the sync word
    pub sync_threshold: u16,
    /// Maximum bit errors tolerated in the header
    pub header_threshold: u16,
    /// Preamble plus address duration
    pub pream_and_addr_duration: u16,
    /// Header duration
    pub header_duration: u16,
    /// Bit rate used for error calculation
    pub bps: u32,
    /// Abort timing
    pub abort: AbortParams,
}

/// Outcome of a reception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RxStatus {
    /// Packet received without errors
    #[default]
    Ok,
    /// Packet received with a CRC error
    CrcError,
    /// Header bits were corrupted
    HeaderError,
    /// No sync word found before the scan ended
    NoSync,
}

impl RxStatus {
    /// Numeric status code used on the wire
    pub fn code(&self) -> u8 {
        match self {
            Self::Ok => 1,
            Self::CrcError => 2,
            Self::HeaderError => 3,
            Self::NoSync => 4,
        }
    }
}

impl TryFrom<u8> for RxStatus {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Ok),
            2 => Ok(Self::CrcError),
            3 => Ok(Self::HeaderError),
            4 => Ok(Self::NoSync),
            other => Err(ProtocolError::UnknownRxStatus(other)),
        }
    }
}

/// RSSI measurement result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RssiDone {
    /// Measured power
    pub rssi: Power,
}

/// Reception response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RxDone {
    /// Time the reception ended
    pub end_time: VirtualTime,
    /// Received payload size
    pub packet_size: u16,
    /// Signal strength of the received packet
    pub rssi: RssiDone,
    /// Time the sync word was found
    pub rx_time_stamp: VirtualTime,
    /// Reception outcome
    pub status: RxStatus,
}

/// Instantaneous RSSI measurement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RssiRequest {
    /// When to measure
    pub meas_time: VirtualTime,
    /// Modulation and channel
    pub radio_params: RadioParams,
    /// Receiver antenna gain
    pub antenna_gain: Power,
}

/// Clear channel assessment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CcaRequest {
    /// Time the assessment starts
    pub start_time: VirtualTime,
    /// Abort timing
    pub abort: AbortParams,
    /// Total assessment duration
    pub scan_duration: u32,
    /// Interval between measurements
    pub scan_period: u32,
    /// Modulation and channel
    pub radio_params: RadioParams,
    /// Threshold above which a compatible modulation counts as busy
    pub mod_threshold: Power,
    /// Threshold above which any energy counts as busy
    pub rssi_threshold: Power,
    /// Receiver antenna gain
    pub antenna_gain: Power,
    /// Stop at the first busy measurement
    pub stop_when_found: bool,
}
