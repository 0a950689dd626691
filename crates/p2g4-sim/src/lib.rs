//! 2.4 GHz PHY Scenario Replay
//!
//! This crate drives the PHY core without a running simulator. It includes:
//!
//! - **Scenario**: a JSON description of registry calls and RX attempts in
//!   dispatch order, with transmissions in either record generation
//! - **Replayer**: a minimal event loop that normalises records through the
//!   remap boundary, applies them to a [`p2g4_phy::PendingTxList`] and
//!   records what each receiver saw
//!
//! # Example
//!
//! ```rust
//! use p2g4_sim::{replay, Scenario};
//! use p2g4_phy::DeviceId;
//!
//! let scenario = Scenario::from_json(r#"{
//!     "phy": { "devices": 2 },
//!     "events": [
//!         { "type": "register", "device": 1,
//!           "tx": { "schema": "v1", "start_time": 100, "phy_address": 170 } },
//!         { "type": "activate", "device": 1 },
//!         { "type": "rx", "device": 0, "time": 100, "rx": { "schema": "v1", "phy_address": 170 } }
//!     ]
//! }"#)?;
//!
//! let outcomes = replay(scenario)?;
//! assert_eq!(outcomes[0].matched, Some(DeviceId(1)));
//! # Ok::<(), p2g4_sim::SimError>(())
//! ```

pub mod error;
pub mod events;
pub mod replay;
pub mod scenario;

pub use error::SimError;
pub use events::{PhyEvent, RxOutcome};
pub use replay::{replay, Replayer};
pub use scenario::{rx_descriptor, slot_descriptor, RxSpec, Scenario, ScenarioEvent, TxSpec};
