//! Carrier codes stored in the index.

use std::fmt;

/// Label used when an index entry carries an unrecognized code.
pub const UNKNOWN_CARRIER_LABEL: &str = "未知电信运营商";

/// Mobile network operator, or virtual-operator class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Carrier {
    /// China Mobile
    Cmcc = 0x01,
    /// China Unicom
    Cucc = 0x02,
    /// China Telecom
    Ctcc = 0x03,
    /// China Telecom virtual operator
    CtccVirtual = 0x04,
    /// China Unicom virtual operator
    CuccVirtual = 0x05,
    /// China Mobile virtual operator
    CmccVirtual = 0x06,
}

impl Carrier {
    /// Every defined carrier, in code order.
    pub const ALL: [Carrier; 6] = [
        Carrier::Cmcc,
        Carrier::Cucc,
        Carrier::Ctcc,
        Carrier::CtccVirtual,
        Carrier::CuccVirtual,
        Carrier::CmccVirtual,
    ];

    /// Convert from a u8 value.
    ///
    /// Returns `None` for undefined codes.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(Carrier::Cmcc),
            0x02 => Some(Carrier::Cucc),
            0x03 => Some(Carrier::Ctcc),
            0x04 => Some(Carrier::CtccVirtual),
            0x05 => Some(Carrier::CuccVirtual),
            0x06 => Some(Carrier::CmccVirtual),
            _ => None,
        }
    }

    /// Convert to a u8 value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Short identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::Cmcc => "CMCC",
            Carrier::Cucc => "CUCC",
            Carrier::Ctcc => "CTCC",
            Carrier::CtccVirtual => "CTCC_v",
            Carrier::CuccVirtual => "CUCC_v",
            Carrier::CmccVirtual => "CMCC_v",
        }
    }

    /// Display label reported in lookups.
    pub fn label(&self) -> &'static str {
        match self {
            Carrier::Cmcc => "中国移动",
            Carrier::Cucc => "中国联通",
            Carrier::Ctcc => "中国电信",
            Carrier::CtccVirtual => "中国电信虚拟运营商",
            Carrier::CuccVirtual => "中国联通虚拟运营商",
            Carrier::CmccVirtual => "中国移动虚拟运营商",
        }
    }
}

/// Map a raw carrier code to its display label.
///
/// Unknown codes degrade to [`UNKNOWN_CARRIER_LABEL`].
pub fn card_type_label(code: u8) -> &'static str {
    Carrier::from_u8(code)
        .map(|c| c.label())
        .unwrap_or(UNKNOWN_CARRIER_LABEL)
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Carrier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Carrier::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
