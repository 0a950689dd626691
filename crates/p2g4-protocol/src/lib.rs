//! 2.4 GHz PHY Interface Records
//!
//! This crate describes what simulated devices send to the 2.4 GHz physical
//! layer simulator and what they get back:
//!
//! - **v1**: the first generation flat request/response records
//! - **v2**: second generation records with separate transmitter and packet
//!   windows, coding rates and receiver tuning
//! - **Combined**: records holding every field of both generations, which is
//!   what the PHY consumes internally
//!
//! # Architecture
//!
//! Radio primitives ([`Modulation`], [`Freq`], [`FreqV2`], [`Power`]) are
//! shared by all generations. The [`remap`] module provides `From`
//! conversions that normalise either generation into the combined records,
//! filling in fixed defaults for fields v1 cannot express.
//!
//! # Example
//!
//! ```rust
//! use p2g4_protocol::{CombinedRx, Freq, Modulation, RadioParams, RxRequest};
//!
//! let rx = RxRequest {
//!     start_time: 1_000,
//!     phy_address: 0x8E89_BED6,
//!     radio_params: RadioParams {
//!         modulation: Modulation::BLE,
//!         center_freq: Freq::from_mhz(2402.0).unwrap(),
//!     },
//!     ..Default::default()
//! };
//!
//! let combined = CombinedRx::from(rx);
//! assert_eq!(combined.n_addr, 1);
//! assert_eq!(combined.forced_packet_duration, u32::MAX);
//! ```

pub mod error;
pub mod radio;
pub mod remap;
pub mod v1;
pub mod v2;

pub use error::ProtocolError;
pub use radio::{AbortParams, Freq, FreqV2, Modulation, Power, RadioParams, RadioParamsV2};
pub use v1::{CcaRequest, RssiDone, RssiRequest, RxDone, RxRequest, RxStatus, TxRequest};
pub use v2::{
    CcaRequestV2, CombinedRx, CombinedTx, RssiRequestV2, RxDoneV2, RxRequestV2, TxRequestV2,
    UNBOUNDED_PACKET_DURATION,
};

/// Simulation time in microseconds
pub type VirtualTime = u64;

/// A time that is never reached
pub const TIME_NEVER: VirtualTime = u64::MAX;
