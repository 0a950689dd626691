//! Scenario replayer
//!
//! Plays the part of the simulator's event loop: it owns the registry,
//! dispatches events one at a time in order and records what every RX
//! attempt saw.

use p2g4_phy::{DeviceId, PendingTxList, PhyConfig, PhyError};
use p2g4_protocol::VirtualTime;
use tracing::{debug, info};

use crate::error::SimError;
use crate::events::{PhyEvent, RxOutcome};
use crate::scenario::{rx_descriptor, slot_descriptor, Scenario, ScenarioEvent};

/// Replays scenario events against a pending transmission registry
#[derive(Debug)]
pub struct Replayer {
    registry: PendingTxList,
    last_rx_time: Option<VirtualTime>,
    outcomes: Vec<RxOutcome>,
    event_buffer: Vec<PhyEvent>,
}

impl Replayer {
    /// Create a replayer with an empty registry
    pub fn new(config: &PhyConfig) -> Result<Self, SimError> {
        Ok(Self {
            registry: PendingTxList::with_config(config)?,
            last_rx_time: None,
            outcomes: Vec::new(),
            event_buffer: Vec::new(),
        })
    }

    /// Dispatch a single event
    ///
    /// Returns the outcome for RX events. A failed event leaves the
    /// registry as it was before the call.
    pub fn apply(&mut self, event: ScenarioEvent) -> Result<Option<RxOutcome>, SimError> {
        match event {
            ScenarioEvent::Register {
                device,
                tx,
                payload,
            } => {
                let combined = tx.to_combined();
                let descriptor = slot_descriptor(&combined)?;
                let payload_len = payload.len();
                self.registry.register(device, descriptor, payload)?;
                self.event_buffer.push(PhyEvent::Registered {
                    device,
                    tx: combined,
                    payload_len,
                });
                Ok(None)
            }
            ScenarioEvent::Activate { device } => {
                self.registry.activate(device)?;
                self.event_buffer.push(PhyEvent::Activated { device });
                Ok(None)
            }
            ScenarioEvent::Clear { device } => {
                self.registry.clear(device)?;
                self.event_buffer.push(PhyEvent::Cleared { device });
                Ok(None)
            }
            ScenarioEvent::Rx { device, time, rx } => {
                self.check_receiver(device)?;
                if let Some(last) = self.last_rx_time {
                    if time < last {
                        return Err(SimError::TimeWentBackwards { time, last });
                    }
                }
                let attempt = rx_descriptor(&rx.to_combined(), rx.phy_address())?;
                self.last_rx_time = Some(time);

                let outcome = RxOutcome {
                    receiver: device,
                    time,
                    matched: self.registry.find_fitting_tx(&attempt, time),
                    registry_version: self.registry.change_counter(),
                };
                match outcome.matched {
                    Some(tx) => debug!("Device {} at {} locked onto device {}", device, time, tx),
                    None => debug!("Device {} at {} found no transmission", device, time),
                }

                self.outcomes.push(outcome);
                self.event_buffer.push(PhyEvent::RxEvaluated(outcome));
                Ok(Some(outcome))
            }
        }
    }

    /// Dispatch every event of a scenario, stopping at the first error
    pub fn run(&mut self, events: impl IntoIterator<Item = ScenarioEvent>) -> Result<(), SimError> {
        for event in events {
            self.apply(event)?;
        }
        Ok(())
    }

    /// Outcomes of every RX attempt so far
    pub fn outcomes(&self) -> &[RxOutcome] {
        &self.outcomes
    }

    /// Take buffered events
    pub fn drain_events(&mut self) -> Vec<PhyEvent> {
        std::mem::take(&mut self.event_buffer)
    }

    /// The registry being driven
    pub fn registry(&self) -> &PendingTxList {
        &self.registry
    }

    fn check_receiver(&self, device: DeviceId) -> Result<(), SimError> {
        let devices = self.registry.devices();
        if device.as_u32() >= devices {
            return Err(PhyError::DeviceOutOfRange { device, devices }.into());
        }
        Ok(())
    }
}

/// Replay a whole scenario and return every RX outcome
pub fn replay(scenario: Scenario) -> Result<Vec<RxOutcome>, SimError> {
    info!(
        "Replaying {} events for {} devices",
        scenario.events.len(),
        scenario.phy.devices
    );

    let mut replayer = Replayer::new(&scenario.phy)?;
    replayer.run(scenario.events)?;

    let matched = replayer
        .outcomes()
        .iter()
        .filter(|o| o.matched.is_some())
        .count();
    info!(
        "Replay finished: {} of {} RX attempts matched a transmission",
        matched,
        replayer.outcomes().len()
    );

    Ok(replayer.outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{RxSpec, TxSpec};
    use p2g4_protocol::{Freq, Modulation, RadioParams, RxRequest, RxRequestV2, TxRequest};

    fn params() -> RadioParams {
        RadioParams {
            modulation: Modulation::BLE,
            center_freq: Freq(2),
        }
    }

    fn register(device: u32, start_time: VirtualTime) -> ScenarioEvent {
        ScenarioEvent::Register {
            device: DeviceId(device),
            tx: TxSpec::V1(TxRequest {
                start_time,
                end_time: start_time + 100,
                phy_address: 0xAA,
                radio_params: params(),
                ..Default::default()
            }),
            payload: vec![0; 8],
        }
    }

    fn rx(device: u32, time: VirtualTime) -> ScenarioEvent {
        ScenarioEvent::Rx {
            device: DeviceId(device),
            time,
            rx: RxSpec::V1(RxRequest {
                phy_address: 0xAA,
                radio_params: params(),
                ..Default::default()
            }),
        }
    }

    fn replayer(devices: u32) -> Replayer {
        Replayer::new(&PhyConfig { devices }).unwrap()
    }

    #[test]
    fn test_rx_outcome_recorded() {
        let mut r = replayer(3);
        r.apply(register(1, 100)).unwrap();
        r.apply(ScenarioEvent::Activate {
            device: DeviceId(1),
        })
        .unwrap();

        let outcome = r.apply(rx(0, 100)).unwrap().unwrap();
        assert_eq!(outcome.receiver, DeviceId(0));
        assert_eq!(outcome.matched, Some(DeviceId(1)));
        assert_eq!(outcome.registry_version, 1);
        assert_eq!(r.outcomes(), &[outcome]);
    }

    #[test]
    fn test_events_are_buffered_in_order() {
        let mut r = replayer(2);
        r.run([
            register(1, 10),
            ScenarioEvent::Activate {
                device: DeviceId(1),
            },
            rx(0, 10),
            ScenarioEvent::Clear {
                device: DeviceId(1),
            },
        ])
        .unwrap();

        let events = r.drain_events();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[0],
            PhyEvent::Registered {
                payload_len: 8,
                ..
            }
        ));
        assert_eq!(events[1], PhyEvent::Activated { device: DeviceId(1) });
        assert_eq!(events[2].device(), DeviceId(0));
        assert_eq!(events[3], PhyEvent::Cleared { device: DeviceId(1) });
        assert!(r.drain_events().is_empty());
    }

    #[test]
    fn test_rx_time_must_not_go_backwards() {
        let mut r = replayer(2);
        r.apply(rx(0, 50)).unwrap();
        r.apply(rx(1, 50)).unwrap();

        let err = r.apply(rx(0, 49)).unwrap_err();
        assert!(matches!(
            err,
            SimError::TimeWentBackwards { time: 49, last: 50 }
        ));
    }

    #[test]
    fn test_receiver_out_of_range() {
        let mut r = replayer(2);
        let err = r.apply(rx(2, 0)).unwrap_err();
        assert!(matches!(
            err,
            SimError::Phy(PhyError::DeviceOutOfRange { .. })
        ));
        assert!(r.outcomes().is_empty());
    }

    #[test]
    fn test_zero_devices_rejected() {
        let err = Replayer::new(&PhyConfig { devices: 0 }).unwrap_err();
        assert!(matches!(err, SimError::Phy(PhyError::NoDevices)));
    }

    #[test]
    fn test_replay_reference_scenario() {
        let scenario = Scenario {
            phy: PhyConfig { devices: 3 },
            events: vec![
                register(1, 100),
                ScenarioEvent::Activate {
                    device: DeviceId(1),
                },
                rx(0, 100),
                rx(2, 101),
                ScenarioEvent::Clear {
                    device: DeviceId(1),
                },
                rx(0, 101),
            ],
        };

        let outcomes = replay(scenario).unwrap();
        let matched: Vec<_> = outcomes.iter().map(|o| o.matched).collect();
        assert_eq!(matched, vec![Some(DeviceId(1)), None, None]);
        assert_eq!(outcomes[2].registry_version, 2);
    }

    #[test]
    fn test_v2_rx_attempt_matches() {
        let mut r = replayer(2);
        r.run([
            register(1, 100),
            ScenarioEvent::Activate {
                device: DeviceId(1),
            },
        ])
        .unwrap();

        let outcome = r
            .apply(ScenarioEvent::Rx {
                device: DeviceId(0),
                time: 100,
                rx: RxSpec::V2 {
                    rx: RxRequestV2 {
                        radio_params: params(),
                        n_addr: 2,
                        ..Default::default()
                    },
                    phy_address: 0xAA,
                },
            })
            .unwrap()
            .unwrap();
        assert_eq!(outcome.matched, Some(DeviceId(1)));
    }
}
