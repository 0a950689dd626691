//! 2.4 GHz PHY Core
//!
//! This crate holds the bookkeeping that decides which transmission a
//! receiver sees. Simulated devices share a virtual clock; each one may have
//! at most one transmission pending or on air at a time.
//!
//! # Architecture
//!
//! - **Slot table** ([`PendingTxList`]): one slot per device with the
//!   transmission descriptor and its owned payload
//! - **Activity tracking**: which slots are on air, the highest active
//!   device id (bounding every scan) and a change counter for caching
//! - **Matcher** ([`PendingTxList::find_fitting_tx`]): the transmission an
//!   RX attempt locks onto, lowest device id first
//!
//! Every operation is synchronous; the registry is owned by the event loop
//! and needs no locking.
//!
//! # Example
//!
//! ```rust
//! use p2g4_phy::{DeviceId, PendingTxList};
//! use p2g4_protocol::{Freq, Modulation, RadioParams, RxRequest, TxRequest};
//!
//! let params = RadioParams {
//!     modulation: Modulation::BLE,
//!     center_freq: Freq(2),
//! };
//!
//! let mut list: PendingTxList = PendingTxList::new(3)?;
//! let tx = TxRequest {
//!     start_time: 100,
//!     end_time: 476,
//!     phy_address: 0x8E89_BED6,
//!     radio_params: params,
//!     ..Default::default()
//! };
//! list.register(DeviceId(1), tx, vec![0x02, 0x00])?;
//! list.activate(DeviceId(1))?;
//!
//! let rx = RxRequest {
//!     phy_address: 0x8E89_BED6,
//!     radio_params: params,
//!     ..Default::default()
//! };
//! assert_eq!(list.find_fitting_tx(&rx, 100), Some(DeviceId(1)));
//! assert_eq!(list.find_fitting_tx(&rx, 101), None);
//!
//! list.clear(DeviceId(1))?;
//! # Ok::<(), p2g4_phy::PhyError>(())
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod matcher;
pub mod tx_list;

pub use config::PhyConfig;
pub use device::DeviceId;
pub use error::PhyError;
pub use matcher::fits;
pub use tx_list::{PendingTxList, TxSlot};
