//! Second generation (v2) records and the combined records the PHY consumes
//!
//! v2 requests still carry v1 radio parameters. The combined records carry
//! v2 radio parameters and every field either generation can express, so
//! both generations can be normalised into them (see [`crate::remap`]).

use crate::radio::{AbortParams, Power, RadioParams, RadioParamsV2};
use crate::v1::{RssiDone, RxStatus};
use crate::VirtualTime;

/// Forced packet duration meaning "not forced"
pub const UNBOUNDED_PACKET_DURATION: u32 = u32::MAX;

/// v2 transmission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TxRequestV2 {
    /// Time the transmitter starts (may include ramp up)
    pub start_tx_time: VirtualTime,
    /// Time the transmitter stops
    pub end_tx_time: VirtualTime,
    /// Time the first packet bit is on air
    pub start_packet_time: VirtualTime,
    /// Time the last packet bit is on air
    pub end_packet_time: VirtualTime,
    /// Abort timing
    pub abort: AbortParams,
    /// Access address / sync word
    pub phy_address: u64,
    /// Modulation and channel
    pub radio_params: RadioParams,
    /// Transmit power
    pub power_level: Power,
    /// Coding rate (coded PHYs only)
    pub coding_rate: u16,
    /// Payload size in bytes
    pub packet_size: u16,
}

/// v2 reception request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RxRequestV2 {
    pub start_time: VirtualTime,
    pub scan_duration: u32,
    pub forced_packet_duration: u32,
    pub error_calc_rate: u32,
    pub radio_params: RadioParams,
    pub antenna_gain: Power,
    pub coding_rate: u16,
    pub pream_and_addr_duration: u16,
    pub header_duration: u16,
    pub acceptable_pre_truncation: u16,
    pub sync_threshold: u16,
    pub header_threshold: u16,
    pub prelocked_tx: bool,
    pub resp_type: u8,
    pub n_addr: u8,
    pub abort: AbortParams,
}

impl Default for RxRequestV2 {
    fn default() -> Self {
        Self {
            start_time: 0,
            scan_duration: 0,
            forced_packet_duration: UNBOUNDED_PACKET_DURATION,
            error_calc_rate: 0,
            radio_params: RadioParams::default(),
            antenna_gain: Power::default(),
            coding_rate: 0,
            pream_and_addr_duration: 0,
            header_duration: 0,
            acceptable_pre_truncation: 0,
            sync_threshold: 0,
            header_threshold: 0,
            prelocked_tx: false,
            resp_type: 0,
            n_addr: 1,
            abort: AbortParams::default(),
        }
    }
}

/// v2 reception response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RxDoneV2 {
    pub status: RxStatus,
    pub rx_time_stamp: VirtualTime,
    pub end_time: VirtualTime,
    /// Address the receiver synchronised to
    pub phy_address: u64,
    pub rssi: RssiDone,
    pub packet_size: u16,
    /// Sync word bit errors observed
    pub sync_errors: u16,
}

/// Combined transmission record: every v1 and v2 field, v2 radio parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedTx {
    pub start_tx_time: VirtualTime,
    pub end_tx_time: VirtualTime,
    pub start_packet_time: VirtualTime,
    pub end_packet_time: VirtualTime,
    pub abort: AbortParams,
    pub phy_address: u64,
    pub radio_params: RadioParamsV2,
    pub power_level: Power,
    pub coding_rate: u16,
    pub packet_size: u16,
}

/// Combined reception record: every v1 and v2 field, v2 radio parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedRx {
    pub start_time: VirtualTime,
    pub scan_duration: u32,
    pub forced_packet_duration: u32,
    pub error_calc_rate: u32,
    pub radio_params: RadioParamsV2,
    pub antenna_gain: Power,
    pub coding_rate: u16,
    pub pream_and_addr_duration: u16,
    pub header_duration: u16,
    pub acceptable_pre_truncation: u16,
    pub sync_threshold: u16,
    pub header_threshold: u16,
    pub prelocked_tx: bool,
    pub resp_type: u8,
    pub n_addr: u8,
    pub abort: AbortParams,
}

/// v2 RSSI measurement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RssiRequestV2 {
    pub meas_time: VirtualTime,
    pub radio_params: RadioParamsV2,
    pub antenna_gain: Power,
}

/// v2 clear channel assessment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CcaRequestV2 {
    pub start_time: VirtualTime,
    pub abort: AbortParams,
    pub scan_duration: u32,
    pub scan_period: u32,
    pub radio_params: RadioParamsV2,
    pub mod_threshold: Power,
    pub rssi_threshold: Power,
    pub antenna_gain: Power,
    pub stop_when_found: bool,
}
