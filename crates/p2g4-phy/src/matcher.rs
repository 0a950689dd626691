//! TX/RX matching
//!
//! A receiver only catches a transmission that starts at exactly the instant
//! it is evaluated, on the same channel, with the same access address and a
//! similar modulation.

use p2g4_protocol::{RxRequest, TxRequest, VirtualTime};
use tracing::trace;

use crate::device::DeviceId;
use crate::tx_list::PendingTxList;

/// Whether `tx` is the transmission `rx` would lock onto at `now`
pub fn fits(tx: &TxRequest, rx: &RxRequest, now: VirtualTime) -> bool {
    tx.start_time == now
        && tx.phy_address == rx.phy_address
        && tx.radio_params.center_freq == rx.radio_params.center_freq
        && tx.radio_params.modulation.is_similar(rx.radio_params.modulation)
}

impl<P> PendingTxList<P> {
    /// Find the transmission an RX attempt sees at `now`
    ///
    /// Only active slots are considered. When several transmissions fit, the
    /// lowest device id wins so replays stay deterministic. `None` just means
    /// nothing compatible is starting on air right now.
    pub fn find_fitting_tx(&self, rx: &RxRequest, now: VirtualTime) -> Option<DeviceId> {
        let highest = self.highest_active?;

        let found = (0..=highest)
            .find(|&i| self.active[i] && fits(&self.slots[i].tx, rx, now))
            .map(DeviceId::from_index);

        trace!(
            "RX at {} for 0x{:08X} on {}: {:?}",
            now,
            rx.phy_address,
            rx.radio_params.center_freq,
            found
        );
        found
    }
}
