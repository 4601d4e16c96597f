//! Hijri month enumeration.
//!
//! The twelve canonical month names are matched exactly as written (case and
//! transliteration form). No aliases are accepted.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// The 12 months of the Hijri year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HijriMonth {
    Muharram,
    Safar,
    RabiAlAwwal,
    RabiAlThani,
    JumadaAlAwwal,
    JumadaAlThani,
    Rajab,
    Shaban,
    Ramadan,
    Shawwal,
    DhuAlQidah,
    DhuAlHijjah,
}

/// All 12 months in canonical order (index 0 = Muharram).
pub const ALL_HIJRI_MONTHS: [HijriMonth; 12] = [
    HijriMonth::Muharram,
    HijriMonth::Safar,
    HijriMonth::RabiAlAwwal,
    HijriMonth::RabiAlThani,
    HijriMonth::JumadaAlAwwal,
    HijriMonth::JumadaAlThani,
    HijriMonth::Rajab,
    HijriMonth::Shaban,
    HijriMonth::Ramadan,
    HijriMonth::Shawwal,
    HijriMonth::DhuAlQidah,
    HijriMonth::DhuAlHijjah,
];

const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-awwal",
    "Rabi' al-thani",
    "Jumada al-awwal",
    "Jumada al-thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qidah",
    "Dhu al-Hijjah",
];

impl HijriMonth {
    /// Canonical transliterated name, e.g. `"Rabi' al-awwal"`.
    pub fn name(self) -> &'static str {
        HIJRI_MONTH_NAMES[self.index() as usize]
    }

    /// 0-based index (Muharram=0 .. Dhu al-Hijjah=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Muharram => 0,
            Self::Safar => 1,
            Self::RabiAlAwwal => 2,
            Self::RabiAlThani => 3,
            Self::JumadaAlAwwal => 4,
            Self::JumadaAlThani => 5,
            Self::Rajab => 6,
            Self::Shaban => 7,
            Self::Ramadan => 8,
            Self::Shawwal => 9,
            Self::DhuAlQidah => 10,
            Self::DhuAlHijjah => 11,
        }
    }

    /// 1-based month number as used by calendar arithmetic.
    pub const fn number(self) -> u8 {
        self.index() + 1
    }

    /// Month from its 1-based number.
    pub fn from_number(number: u8) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(ALL_HIJRI_MONTHS[(number - 1) as usize])
        } else {
            None
        }
    }

    /// Look up a month by its exact canonical name.
    pub fn from_name(name: &str) -> Result<Self, CalendarError> {
        HIJRI_MONTH_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| ALL_HIJRI_MONTHS[i])
            .ok_or_else(|| CalendarError::InvalidMonth(name.to_string()))
    }
}

impl Display for HijriMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HijriMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
