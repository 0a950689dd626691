//! Pending transmission registry
//!
//! One slot per device holding the device's current transmission and its
//! payload. A slot goes through `register` (populated, not yet on air),
//! `activate` (the transmission has started) and `clear` (the transmission
//! ended or was aborted; the payload is released).
//!
//! The registry also tracks the highest active device id so the matcher only
//! scans `0..=highest` instead of every slot.

use p2g4_protocol::TxRequest;
use tracing::{debug, warn};

use crate::config::PhyConfig;
use crate::device::DeviceId;
use crate::error::PhyError;

/// A device's transmission slot
#[derive(Debug)]
pub struct TxSlot<P = Vec<u8>> {
    pub(crate) tx: TxRequest,
    pub(crate) packet: Option<P>,
}

impl<P> TxSlot<P> {
    /// Descriptor of the last registered transmission
    pub fn tx(&self) -> &TxRequest {
        &self.tx
    }

    /// Payload, if one is attached
    pub fn packet(&self) -> Option<&P> {
        self.packet.as_ref()
    }

    /// Whether a payload is attached
    pub fn has_packet(&self) -> bool {
        self.packet.is_some()
    }
}

/// Fixed capacity table of pending and in-flight transmissions
///
/// `P` is the payload type. The table owns each payload from `register`
/// until `clear` (or until the table is dropped).
#[derive(Debug)]
pub struct PendingTxList<P = Vec<u8>> {
    pub(crate) slots: Vec<TxSlot<P>>,
    pub(crate) active: Vec<bool>,
    pub(crate) highest_active: Option<usize>,
    change_counter: u64,
}

impl<P> PendingTxList<P> {
    /// Create a table with one slot per device
    pub fn new(devices: u32) -> Result<Self, PhyError> {
        if devices == 0 {
            return Err(PhyError::NoDevices);
        }

        let n = devices as usize;
        let mut slots = Vec::with_capacity(n);
        slots.resize_with(n, || TxSlot {
            tx: TxRequest::default(),
            packet: None,
        });

        debug!("Created pending tx list for {} devices", devices);

        Ok(Self {
            slots,
            active: vec![false; n],
            highest_active: None,
            change_counter: 0,
        })
    }

    /// Create a table sized from configuration
    pub fn with_config(config: &PhyConfig) -> Result<Self, PhyError> {
        Self::new(config.devices)
    }

    /// Number of device slots
    pub fn devices(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Register a transmission a device has just requested
    ///
    /// The transmission is not on air yet; call [`activate`](Self::activate)
    /// once virtual time reaches its start. Ownership of `packet` moves into
    /// the table.
    ///
    /// Every `register` must be followed by a `clear` before the same device
    /// registers again. Registering over an uncleared slot is a caller bug:
    /// it panics in debug builds, leaving the slot untouched, and drops the
    /// stale payload otherwise. A slot that was on air is taken off air in
    /// that case without bumping [`change_counter`](Self::change_counter),
    /// so cached match results are not invalidated by it.
    pub fn register(&mut self, device: DeviceId, tx: TxRequest, packet: P) -> Result<(), PhyError> {
        let index = self.index_of(device)?;

        let stale = self.slots[index].has_packet();
        debug_assert!(!stale, "device {} registered again before clear", device);
        if stale {
            warn!(
                "Device {} registered a transmission before clearing the previous one",
                device
            );
        }

        let slot = &mut self.slots[index];
        slot.tx = tx;
        // Replacing drops the stale payload, if any
        slot.packet = Some(packet);

        if self.active[index] {
            self.active[index] = false;
            self.rescan_highest();
        }

        debug!(
            "Registered tx for device {}: {}..{} on {}",
            device, tx.start_time, tx.end_time, tx.radio_params.center_freq
        );
        Ok(())
    }

    /// Mark a device's registered transmission as on air
    pub fn activate(&mut self, device: DeviceId) -> Result<(), PhyError> {
        let index = self.index_of(device)?;

        self.active[index] = true;
        self.change_counter += 1;
        self.highest_active = Some(self.highest_active.map_or(index, |h| h.max(index)));

        debug!("Activated tx for device {}", device);
        Ok(())
    }

    /// End a device's transmission and release its payload
    pub fn clear(&mut self, device: DeviceId) -> Result<(), PhyError> {
        let index = self.index_of(device)?;

        self.active[index] = false;
        // Dropping the payload here is its single release point
        self.slots[index].packet = None;
        self.change_counter += 1;
        self.rescan_highest();

        debug!("Cleared tx for device {}", device);
        Ok(())
    }

    /// Walk down from the previous maximum to the next active slot
    fn rescan_highest(&mut self) {
        self.highest_active = self
            .highest_active
            .and_then(|from| (0..=from).rev().find(|&i| self.active[i]));
    }

    /// Slot for a device
    pub fn slot(&self, device: DeviceId) -> Option<&TxSlot<P>> {
        self.slots.get(device.index())
    }

    /// Whether a device is currently transmitting
    pub fn is_active(&self, device: DeviceId) -> bool {
        self.active.get(device.index()).copied().unwrap_or(false)
    }

    /// Highest device id currently transmitting
    pub fn highest_active(&self) -> Option<DeviceId> {
        self.highest_active.map(DeviceId::from_index)
    }

    /// Counter bumped on every activation and every clear
    ///
    /// Callers can cache results derived from the set of active
    /// transmissions and invalidate them when this value changes.
    pub fn change_counter(&self) -> u64 {
        self.change_counter
    }

    /// Devices currently transmitting, lowest id first
    pub fn active_devices(&self) -> impl Iterator<Item = DeviceId> + '_ {
        let end = self.highest_active.map_or(0, |h| h + 1);
        self.active[..end]
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| DeviceId::from_index(i))
    }

    /// Number of slots holding a payload
    pub fn attached_payloads(&self) -> usize {
        self.slots.iter().filter(|s| s.packet.is_some()).count()
    }

    fn index_of(&self, device: DeviceId) -> Result<usize, PhyError> {
        let index = device.index();
        if index >= self.slots.len() {
            return Err(PhyError::DeviceOutOfRange {
                device,
                devices: self.devices(),
            });
        }
        Ok(index)
    }
}

impl<P> Drop for PendingTxList<P> {
    fn drop(&mut self) {
        let attached = self.attached_payloads();
        if attached > 0 {
            debug!("Releasing {} payloads still attached at teardown", attached);
        }
    }
}
