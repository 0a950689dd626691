//! Scenario descriptions
//!
//! A scenario is the device count plus an ordered list of registry calls and
//! RX attempts, as an event loop would have issued them. Scenarios are plain
//! JSON so recorded runs can be replayed and diffed.

use std::path::Path;

use p2g4_phy::{DeviceId, PhyConfig};
use p2g4_protocol::{
    CombinedRx, CombinedTx, Freq, RadioParams, RxRequest, RxRequestV2, TxRequest, TxRequestV2,
    VirtualTime,
};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A recorded run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    /// Registry configuration
    #[serde(default)]
    pub phy: PhyConfig,
    /// Events in the order they were dispatched
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    /// Parse a scenario from JSON text
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One dispatched event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// A device requested a transmission
    Register {
        device: DeviceId,
        tx: TxSpec,
        #[serde(default)]
        payload: Vec<u8>,
    },
    /// Virtual time reached a transmission's start
    Activate { device: DeviceId },
    /// A transmission ended or was aborted
    Clear { device: DeviceId },
    /// A receiver evaluated an RX attempt at `time`
    Rx {
        device: DeviceId,
        time: VirtualTime,
        rx: RxSpec,
    },
}

/// Transmission request in either schema generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum TxSpec {
    V1(TxRequest),
    V2(TxRequestV2),
}

impl TxSpec {
    /// Normalise to the combined record
    pub fn to_combined(&self) -> CombinedTx {
        match *self {
            TxSpec::V1(tx) => tx.into(),
            TxSpec::V2(tx) => tx.into(),
        }
    }
}

/// Reception request in either schema generation
///
/// v2 receivers may search for several addresses; the replayer matches on
/// the single `phy_address` given alongside the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum RxSpec {
    V1(RxRequest),
    V2 { rx: RxRequestV2, phy_address: u32 },
}

impl RxSpec {
    /// Normalise to the combined record
    pub fn to_combined(&self) -> CombinedRx {
        match *self {
            RxSpec::V1(rx) => rx.into(),
            RxSpec::V2 { rx, .. } => rx.into(),
        }
    }

    /// Address the receiver searches for
    pub fn phy_address(&self) -> u32 {
        match self {
            RxSpec::V1(rx) => rx.phy_address,
            RxSpec::V2 { phy_address, .. } => *phy_address,
        }
    }
}

/// Narrow a combined RX record to the attempt the matcher evaluates
pub fn rx_descriptor(rx: &CombinedRx, phy_address: u32) -> Result<RxRequest, SimError> {
    Ok(RxRequest {
        start_time: rx.start_time,
        scan_duration: rx.scan_duration,
        phy_address,
        radio_params: RadioParams {
            modulation: rx.radio_params.modulation,
            center_freq: Freq::try_from(rx.radio_params.center_freq)?,
        },
        antenna_gain: rx.antenna_gain,
        sync_threshold: rx.sync_threshold,
        header_threshold: rx.header_threshold,
        pream_and_addr_duration: rx.pream_and_addr_duration,
        header_duration: rx.header_duration,
        bps: rx.error_calc_rate,
        abort: rx.abort,
    })
}

/// Narrow a combined record to the descriptor a registry slot holds
///
/// The slot tracks the packet window, so v2 ramp up and ramp down times are
/// not part of the match.
pub fn slot_descriptor(tx: &CombinedTx) -> Result<TxRequest, SimError> {
    let phy_address =
        u32::try_from(tx.phy_address).map_err(|_| SimError::AddressTooWide(tx.phy_address))?;

    Ok(TxRequest {
        start_time: tx.start_packet_time,
        end_time: tx.end_packet_time,
        abort: tx.abort,
        phy_address,
        radio_params: RadioParams {
            modulation: tx.radio_params.modulation,
            center_freq: Freq::try_from(tx.radio_params.center_freq)?,
        },
        power_level: tx.power_level,
        packet_size: tx.packet_size,
    })
}
