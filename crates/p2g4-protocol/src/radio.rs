//! Radio primitives shared by every record generation
//!
//! Modulation identifiers, channel frequencies in both generations' formats,
//! fixed point power levels and abort timing.

use std::fmt;

use crate::error::ProtocolError;
use crate::{VirtualTime, TIME_NEVER};

/// Base frequency all channel offsets are relative to
pub const BASE_FREQ_MHZ: f64 = 2400.0;

/// Number of fractional bits in a v2 frequency
pub const FREQ_V2_FRAC_BITS: u32 = 8;

/// Modulation identifier
///
/// The upper bits select the modulation family; the lowest nibble encodes
/// sub-variants that do not affect PHY compatibility. Two modulations are
/// compatible when they agree on every bit of [`Modulation::SIMILAR_MASK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Modulation(pub u16);

impl Modulation {
    /// Bits that must match for two modulations to be considered similar
    pub const SIMILAR_MASK: u16 = 0xFFF0;

    /// BLE 1 Mbps
    pub const BLE: Modulation = Modulation(0x10);
    /// BLE 2 Mbps
    pub const BLE_2M: Modulation = Modulation(0x20);
    /// Proprietary 2 Mbps (similar to BLE 2 Mbps)
    pub const PROP_2M: Modulation = Modulation(0x21);
    /// Proprietary 3 Mbps
    pub const PROP_3M: Modulation = Modulation(0x31);
    /// Proprietary 4 Mbps
    pub const PROP_4M: Modulation = Modulation(0x41);
    /// BLE Coded PHY (S=2 and S=8)
    pub const BLE_CODED: Modulation = Modulation(0x100);
    /// IEEE 802.15.4-2006 DSSS 250 kbps O-QPSK
    pub const IEEE802154_250K: Modulation = Modulation(0x400);

    /// Raw identifier value
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Family bits (the identifier with sub-variant bits masked out)
    pub fn family(&self) -> u16 {
        self.0 & Self::SIMILAR_MASK
    }

    /// Whether a receiver configured for `other` can demodulate this
    pub fn is_similar(&self, other: Modulation) -> bool {
        self.family() == other.family()
    }

    /// Human-readable name for known modulations
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::BLE => Some("BLE 1M"),
            Self::BLE_2M => Some("BLE 2M"),
            Self::PROP_2M => Some("Proprietary 2M"),
            Self::PROP_3M => Some("Proprietary 3M"),
            Self::PROP_4M => Some("Proprietary 4M"),
            Self::BLE_CODED => Some("BLE Coded"),
            Self::IEEE802154_250K => Some("802.15.4 250k"),
            _ => None,
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:04X})", name, self.0),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

/// v1 channel frequency: whole MHz above 2400 MHz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Freq(pub u16);

impl Freq {
    /// Build from an absolute frequency in MHz
    pub fn from_mhz(mhz: f64) -> Result<Self, ProtocolError> {
        let offset = mhz - BASE_FREQ_MHZ;
        if !offset.is_finite() || offset < 0.0 || offset > f64::from(u16::MAX) {
            return Err(ProtocolError::InvalidFrequency {
                mhz,
                reason: "outside the v1 range",
            });
        }
        if offset.fract() != 0.0 {
            return Err(ProtocolError::InvalidFrequency {
                mhz,
                reason: "v1 frequencies are whole MHz",
            });
        }
        Ok(Freq(offset as u16))
    }

    /// Absolute frequency in MHz
    pub fn as_mhz(&self) -> f64 {
        BASE_FREQ_MHZ + f64::from(self.0)
    }
}

impl fmt::Display for Freq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} MHz", self.as_mhz())
    }
}

/// v2 channel frequency: signed offset from 2400 MHz in 1/256 MHz steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FreqV2(pub i32);

impl FreqV2 {
    /// Build from an absolute frequency in MHz
    ///
    /// The value must be an exact multiple of 1/256 MHz.
    pub fn from_mhz(mhz: f64) -> Result<Self, ProtocolError> {
        let scaled = (mhz - BASE_FREQ_MHZ) * f64::from(1u32 << FREQ_V2_FRAC_BITS);
        if !scaled.is_finite() || scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
            return Err(ProtocolError::InvalidFrequency {
                mhz,
                reason: "outside the v2 range",
            });
        }
        if scaled.fract() != 0.0 {
            return Err(ProtocolError::InvalidFrequency {
                mhz,
                reason: "not a multiple of 1/256 MHz",
            });
        }
        Ok(FreqV2(scaled as i32))
    }

    /// Absolute frequency in MHz
    pub fn as_mhz(&self) -> f64 {
        BASE_FREQ_MHZ + f64::from(self.0) / f64::from(1u32 << FREQ_V2_FRAC_BITS)
    }
}

impl From<Freq> for FreqV2 {
    fn from(freq: Freq) -> Self {
        FreqV2(i32::from(freq.0) << FREQ_V2_FRAC_BITS)
    }
}

impl TryFrom<FreqV2> for Freq {
    type Error = ProtocolError;

    /// Narrow to v1; only whole MHz at or above 2400 MHz survive
    fn try_from(freq: FreqV2) -> Result<Self, Self::Error> {
        let step = 1i32 << FREQ_V2_FRAC_BITS;
        if freq.0 % step != 0 {
            return Err(ProtocolError::InvalidFrequency {
                mhz: freq.as_mhz(),
                reason: "v1 frequencies are whole MHz",
            });
        }
        u16::try_from(freq.0 / step)
            .map(Freq)
            .map_err(|_| ProtocolError::InvalidFrequency {
                mhz: freq.as_mhz(),
                reason: "outside the v1 range",
            })
    }
}

impl fmt::Display for FreqV2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} MHz", self.as_mhz())
    }
}

/// Power level or antenna gain in dBm (or dB), signed 8.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Power(pub i16);

impl Power {
    /// Build from a value in dBm, rounding to the nearest 1/256 dB
    pub fn from_dbm(dbm: f64) -> Result<Self, ProtocolError> {
        let scaled = (dbm * 256.0).round();
        if !scaled.is_finite() || scaled < f64::from(i16::MIN) || scaled > f64::from(i16::MAX) {
            return Err(ProtocolError::PowerOutOfRange(dbm));
        }
        Ok(Power(scaled as i16))
    }

    /// Value in dBm
    pub fn as_dbm(&self) -> f64 {
        f64::from(self.0) / 256.0
    }
}

/// v1 radio parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioParams {
    /// Modulation in use
    pub modulation: Modulation,
    /// Channel center frequency
    pub center_freq: Freq,
}

/// v2 radio parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioParamsV2 {
    /// Modulation in use
    pub modulation: Modulation,
    /// Channel center frequency
    pub center_freq: FreqV2,
}

/// When the device wants to be given the chance to abort an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbortParams {
    /// Time at which the operation is aborted
    pub abort_time: VirtualTime,
    /// Time at which the device wants to re-evaluate the abort
    pub recheck_time: VirtualTime,
}

impl Default for AbortParams {
    fn default() -> Self {
        Self {
            abort_time: TIME_NEVER,
            recheck_time: TIME_NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_similar_modulations() {
        assert!(Modulation::BLE_2M.is_similar(Modulation::PROP_2M));
        assert!(!Modulation::BLE.is_similar(Modulation::BLE_2M));
        assert!(!Modulation::BLE_CODED.is_similar(Modulation::BLE));
    }

    #[test]
    fn test_modulation_display() {
        assert_eq!(Modulation::BLE.to_string(), "BLE 1M (0x0010)");
        assert_eq!(Modulation(0x1234).to_string(), "0x1234");
    }

    #[test]
    fn test_freq_from_mhz() {
        assert_eq!(Freq::from_mhz(2402.0).unwrap(), Freq(2));
        assert_eq!(Freq::from_mhz(2480.0).unwrap(), Freq(80));
        assert!(Freq::from_mhz(2399.0).is_err());
        assert!(Freq::from_mhz(2402.5).is_err());
        assert!(Freq::from_mhz(f64::NAN).is_err());
    }

    #[test]
    fn test_freq_v2_from_mhz() {
        assert_eq!(FreqV2::from_mhz(2402.0).unwrap(), FreqV2(512));
        assert_eq!(FreqV2::from_mhz(2402.5).unwrap(), FreqV2(640));
        assert_eq!(FreqV2::from_mhz(2399.0).unwrap(), FreqV2(-256));
        assert!(FreqV2::from_mhz(2402.001).is_err());
    }

    #[test]
    fn test_freq_v1_to_v2_keeps_center() {
        let v1 = Freq(26);
        let v2 = FreqV2::from(v1);
        assert_eq!(v2, FreqV2(26 * 256));
        assert_eq!(v1.as_mhz(), v2.as_mhz());
    }

    #[test]
    fn test_freq_v2_narrowing() {
        assert_eq!(Freq::try_from(FreqV2(80 << 8)).unwrap(), Freq(80));
        assert!(Freq::try_from(FreqV2(640)).is_err());
        assert!(Freq::try_from(FreqV2(-256)).is_err());
    }

    #[test]
    fn test_freq_display() {
        assert_eq!(Freq(2).to_string(), "2402 MHz");
        assert_eq!(FreqV2(640).to_string(), "2402.500 MHz");
    }

    #[test]
    fn test_power_from_dbm() {
        assert_eq!(Power::from_dbm(0.0).unwrap(), Power(0));
        assert_eq!(Power::from_dbm(-20.5).unwrap(), Power(-5248));
        assert_eq!(Power::from_dbm(-20.5).unwrap().as_dbm(), -20.5);
        assert!(Power::from_dbm(200.0).is_err());
    }

    #[test]
    fn test_abort_defaults_to_never() {
        let abort = AbortParams::default();
        assert_eq!(abort.abort_time, TIME_NEVER);
        assert_eq!(abort.recheck_time, TIME_NEVER);
    }

    proptest! {
        #[test]
        fn low_nibble_never_affects_similarity(raw in any::<u16>(), a in 0u16..16, b in 0u16..16) {
            let x = Modulation((raw & Modulation::SIMILAR_MASK) | a);
            let y = Modulation((raw & Modulation::SIMILAR_MASK) | b);
            prop_assert!(x.is_similar(y));
        }

        #[test]
        fn family_difference_is_never_similar(x: u16, y: u16) {
            prop_assume!(x & Modulation::SIMILAR_MASK != y & Modulation::SIMILAR_MASK);
            prop_assert!(!Modulation(x).is_similar(Modulation(y)));
        }
    }
}
