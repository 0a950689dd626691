//! Remapping between record generations
//!
//! Requests from either generation are normalised into the combined records;
//! fields the older generation cannot express get fixed defaults. Responses
//! travel the other way, from v2 back to v1 for devices on the old interface.

use crate::radio::{RadioParams, RadioParamsV2};
use crate::v1::{CcaRequest, RssiRequest, RxDone, RxRequest, TxRequest};
use crate::v2::{
    CcaRequestV2, CombinedRx, CombinedTx, RssiRequestV2, RxDoneV2, RxRequestV2, TxRequestV2,
    UNBOUNDED_PACKET_DURATION,
};

impl From<RadioParams> for RadioParamsV2 {
    fn from(params: RadioParams) -> Self {
        Self {
            modulation: params.modulation,
            center_freq: params.center_freq.into(),
        }
    }
}

impl From<RxDoneV2> for RxDone {
    fn from(done: RxDoneV2) -> Self {
        Self {
            end_time: done.end_time,
            packet_size: done.packet_size,
            rssi: done.rssi,
            rx_time_stamp: done.rx_time_stamp,
            status: done.status,
        }
    }
}

impl From<RxRequest> for CombinedRx {
    fn from(rx: RxRequest) -> Self {
        Self {
            start_time: rx.start_time,
            scan_duration: rx.scan_duration,
            forced_packet_duration: UNBOUNDED_PACKET_DURATION,
            error_calc_rate: rx.bps,
            radio_params: rx.radio_params.into(),
            antenna_gain: rx.antenna_gain,
            coding_rate: 0,
            pream_and_addr_duration: rx.pream_and_addr_duration,
            header_duration: rx.header_duration,
            acceptable_pre_truncation: 0,
            sync_threshold: rx.sync_threshold,
            header_threshold: rx.header_threshold,
            prelocked_tx: false,
            resp_type: 0,
            n_addr: 1,
            abort: rx.abort,
        }
    }
}

impl From<RxRequestV2> for CombinedRx {
    fn from(rx: RxRequestV2) -> Self {
        Self {
            start_time: rx.start_time,
            scan_duration: rx.scan_duration,
            forced_packet_duration: rx.forced_packet_duration,
            error_calc_rate: rx.error_calc_rate,
            radio_params: rx.radio_params.into(),
            antenna_gain: rx.antenna_gain,
            coding_rate: rx.coding_rate,
            pream_and_addr_duration: rx.pream_and_addr_duration,
            header_duration: rx.header_duration,
            acceptable_pre_truncation: rx.acceptable_pre_truncation,
            sync_threshold: rx.sync_threshold,
            header_threshold: rx.header_threshold,
            prelocked_tx: rx.prelocked_tx,
            resp_type: rx.resp_type,
            n_addr: rx.n_addr,
            abort: rx.abort,
        }
    }
}

impl From<TxRequest> for CombinedTx {
    fn from(tx: TxRequest) -> Self {
        // v1 has no ramp up: the transmitter and the packet share one window
        Self {
            start_tx_time: tx.start_time,
            end_tx_time: tx.end_time,
            start_packet_time: tx.start_time,
            end_packet_time: tx.end_time,
            abort: tx.abort,
            phy_address: u64::from(tx.phy_address),
            radio_params: tx.radio_params.into(),
            power_level: tx.power_level,
            coding_rate: 0,
            packet_size: tx.packet_size,
        }
    }
}

impl From<TxRequestV2> for CombinedTx {
    fn from(tx: TxRequestV2) -> Self {
        Self {
            start_tx_time: tx.start_tx_time,
            end_tx_time: tx.end_tx_time,
            start_packet_time: tx.start_packet_time,
            end_packet_time: tx.end_packet_time,
            abort: tx.abort,
            phy_address: tx.phy_address,
            radio_params: tx.radio_params.into(),
            power_level: tx.power_level,
            coding_rate: tx.coding_rate,
            packet_size: tx.packet_size,
        }
    }
}

impl From<RssiRequest> for RssiRequestV2 {
    fn from(req: RssiRequest) -> Self {
        Self {
            meas_time: req.meas_time,
            radio_params: req.radio_params.into(),
            antenna_gain: req.antenna_gain,
        }
    }
}

impl From<CcaRequest> for CcaRequestV2 {
    fn from(req: CcaRequest) -> Self {
        Self {
            start_time: req.start_time,
            abort: req.abort,
            scan_duration: req.scan_duration,
            scan_period: req.scan_period,
            radio_params: req.radio_params.into(),
            mod_threshold: req.mod_threshold,
            rssi_threshold: req.rssi_threshold,
            antenna_gain: req.antenna_gain,
            stop_when_found: req.stop_when_found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::{AbortParams, Freq, FreqV2, Modulation, Power};
    use crate::v1::{RssiDone, RxStatus};

    fn params() -> RadioParams {
        RadioParams {
            modulation: Modulation::BLE,
            center_freq: Freq(2),
        }
    }

    #[test]
    fn test_radio_params_convert_frequency() {
        let v2 = RadioParamsV2::from(params());
        assert_eq!(v2.modulation, Modulation::BLE);
        assert_eq!(v2.center_freq, FreqV2(2 << 8));
    }

    #[test]
    fn test_rx_v1_gets_defaults() {
        let rx = RxRequest {
            start_time: 1_000,
            scan_duration: 200,
            phy_address: 0x8E89_BED6,
            radio_params: params(),
            antenna_gain: Power(256),
            sync_threshold: 2,
            header_threshold: 3,
            pream_and_addr_duration: 40,
            header_duration: 16,
            bps: 1_000_000,
            abort: AbortParams {
                abort_time: 5_000,
                recheck_time: 4_000,
            },
        };

        let combined = CombinedRx::from(rx);
        assert_eq!(combined.start_time, 1_000);
        assert_eq!(combined.scan_duration, 200);
        assert_eq!(combined.error_calc_rate, 1_000_000);
        assert_eq!(combined.antenna_gain, Power(256));
        assert_eq!(combined.sync_threshold, 2);
        assert_eq!(combined.header_threshold, 3);
        assert_eq!(combined.pream_and_addr_duration, 40);
        assert_eq!(combined.header_duration, 16);
        assert_eq!(combined.abort, rx.abort);
        assert_eq!(combined.radio_params.center_freq, FreqV2(512));

        assert_eq!(combined.acceptable_pre_truncation, 0);
        assert_eq!(combined.resp_type, 0);
        assert_eq!(combined.n_addr, 1);
        assert!(!combined.prelocked_tx);
        assert_eq!(combined.coding_rate, 0);
        assert_eq!(combined.forced_packet_duration, UNBOUNDED_PACKET_DURATION);
    }

    #[test]
    fn test_rx_v2_keeps_every_field() {
        let rx = RxRequestV2 {
            start_time: 7,
            scan_duration: 8,
            forced_packet_duration: 9,
            error_calc_rate: 2_000_000,
            radio_params: params(),
            antenna_gain: Power(-3),
            coding_rate: 8,
            pream_and_addr_duration: 10,
            header_duration: 11,
            acceptable_pre_truncation: 12,
            sync_threshold: 13,
            header_threshold: 14,
            prelocked_tx: true,
            resp_type: 1,
            n_addr: 3,
            abort: AbortParams::default(),
        };

        let combined = CombinedRx::from(rx);
        assert_eq!(combined.forced_packet_duration, 9);
        assert_eq!(combined.error_calc_rate, 2_000_000);
        assert_eq!(combined.coding_rate, 8);
        assert_eq!(combined.acceptable_pre_truncation, 12);
        assert!(combined.prelocked_tx);
        assert_eq!(combined.resp_type, 1);
        assert_eq!(combined.n_addr, 3);
        assert_eq!(combined.radio_params, RadioParamsV2::from(params()));
    }

    #[test]
    fn test_tx_v1_uses_one_window() {
        let tx = TxRequest {
            start_time: 100,
            end_time: 476,
            abort: AbortParams::default(),
            phy_address: 0xAA,
            radio_params: params(),
            power_level: Power(0),
            packet_size: 37,
        };

        let combined = CombinedTx::from(tx);
        assert_eq!(combined.start_tx_time, 100);
        assert_eq!(combined.start_packet_time, 100);
        assert_eq!(combined.end_tx_time, 476);
        assert_eq!(combined.end_packet_time, 476);
        assert_eq!(combined.phy_address, 0xAA);
        assert_eq!(combined.coding_rate, 0);
        assert_eq!(combined.packet_size, 37);
    }

    #[test]
    fn test_tx_v2_keeps_packet_window() {
        let tx = TxRequestV2 {
            start_tx_time: 90,
            end_tx_time: 500,
            start_packet_time: 100,
            end_packet_time: 476,
            phy_address: 0x1_0000_0000,
            radio_params: params(),
            coding_rate: 2,
            packet_size: 12,
            ..Default::default()
        };

        let combined = CombinedTx::from(tx);
        assert_eq!(combined.start_tx_time, 90);
        assert_eq!(combined.end_tx_time, 500);
        assert_eq!(combined.start_packet_time, 100);
        assert_eq!(combined.end_packet_time, 476);
        assert_eq!(combined.phy_address, 0x1_0000_0000);
        assert_eq!(combined.coding_rate, 2);
    }

    #[test]
    fn test_rx_done_drops_v2_only_fields() {
        let done = RxDoneV2 {
            status: RxStatus::CrcError,
            rx_time_stamp: 150,
            end_time: 480,
            phy_address: 0xAA,
            rssi: RssiDone { rssi: Power(-60 * 256) },
            packet_size: 20,
            sync_errors: 1,
        };

        let v1 = RxDone::from(done);
        assert_eq!(v1.status, RxStatus::CrcError);
        assert_eq!(v1.rx_time_stamp, 150);
        assert_eq!(v1.end_time, 480);
        assert_eq!(v1.rssi, done.rssi);
        assert_eq!(v1.packet_size, 20);
    }

    #[test]
    fn test_rssi_and_cca_convert_params() {
        let rssi = RssiRequestV2::from(RssiRequest {
            meas_time: 42,
            radio_params: params(),
            antenna_gain: Power(5),
        });
        assert_eq!(rssi.meas_time, 42);
        assert_eq!(rssi.antenna_gain, Power(5));
        assert_eq!(rssi.radio_params.center_freq, FreqV2(512));

        let cca = CcaRequestV2::from(CcaRequest {
            start_time: 10,
            abort: AbortParams::default(),
            scan_duration: 128,
            scan_period: 16,
            radio_params: params(),
            mod_threshold: Power(-70 * 256),
            rssi_threshold: Power(-80 * 256),
            antenna_gain: Power(0),
            stop_when_found: true,
        });
        assert_eq!(cca.start_time, 10);
        assert_eq!(cca.scan_duration, 128);
        assert_eq!(cca.scan_period, 16);
        assert_eq!(cca.mod_threshold, Power(-70 * 256));
        assert_eq!(cca.rssi_threshold, Power(-80 * 256));
        assert!(cca.stop_when_found);
        assert_eq!(cca.radio_params.modulation, Modulation::BLE);
    }
}
