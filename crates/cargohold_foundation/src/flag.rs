//! Slot flags locating an item inside its container.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The slot or role an item occupies within its container.
///
/// Flags are ordered by their numeric value so that contiguous slot banks
/// (low, medium, high, rig) can be queried as ranges.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemFlag(pub u16);

#[allow(missing_docs)]
impl ItemFlag {
    pub const AUTOFIT: Self = Self(0);
    pub const WALLET: Self = Self(1);
    pub const FACTORY: Self = Self(2);
    pub const HANGAR: Self = Self(4);
    pub const CARGO_HOLD: Self = Self(5);
    pub const BRIEFCASE: Self = Self(6);
    pub const SKILL: Self = Self(7);
    pub const REWARD: Self = Self(8);
    pub const CONNECTED: Self = Self(9);
    pub const DISCONNECTED: Self = Self(10);
    pub const LOW_SLOT_0: Self = Self(11);
    pub const LOW_SLOT_7: Self = Self(18);
    pub const MED_SLOT_0: Self = Self(19);
    pub const MED_SLOT_7: Self = Self(26);
    pub const HI_SLOT_0: Self = Self(27);
    pub const HI_SLOT_7: Self = Self(34);
    pub const FIXED_SLOT: Self = Self(35);
    pub const CAPSULE: Self = Self(56);
    pub const PILOT: Self = Self(57);
    pub const PASSENGER: Self = Self(58);
    pub const BOARDING_GATE: Self = Self(59);
    pub const CREW: Self = Self(60);
    pub const SKILL_IN_TRAINING: Self = Self(61);
    pub const CORP_MARKET: Self = Self(62);
    pub const LOCKED: Self = Self(63);
    pub const UNLOCKED: Self = Self(64);
    pub const BONUS: Self = Self(86);
    pub const DRONE_BAY: Self = Self(87);
    pub const BOOSTER: Self = Self(88);
    pub const IMPLANT: Self = Self(89);
    pub const SHIP_HANGAR: Self = Self(90);
    pub const SHIP_OFFLINE: Self = Self(91);
    pub const RIG_SLOT_0: Self = Self(92);
    pub const RIG_SLOT_7: Self = Self(99);
    pub const FACTORY_OPERATION: Self = Self(100);
}

impl ItemFlag {
    /// First flag of the fitted-module banks (low, medium, high, fixed).
    pub const FIRST_MODULE_SLOT: Self = Self::LOW_SLOT_0;
    /// Last flag of the fitted-module banks.
    pub const LAST_MODULE_SLOT: Self = Self::FIXED_SLOT;

    /// Returns the `n`th low slot, if it exists.
    #[must_use]
    pub fn low_slot(n: u16) -> Option<Self> {
        Self::bank(Self::LOW_SLOT_0, Self::LOW_SLOT_7, n)
    }

    /// Returns the `n`th medium slot, if it exists.
    #[must_use]
    pub fn med_slot(n: u16) -> Option<Self> {
        Self::bank(Self::MED_SLOT_0, Self::MED_SLOT_7, n)
    }

    /// Returns the `n`th high slot, if it exists.
    #[must_use]
    pub fn hi_slot(n: u16) -> Option<Self> {
        Self::bank(Self::HI_SLOT_0, Self::HI_SLOT_7, n)
    }

    /// Returns the `n`th rig slot, if it exists.
    #[must_use]
    pub fn rig_slot(n: u16) -> Option<Self> {
        Self::bank(Self::RIG_SLOT_0, Self::RIG_SLOT_7, n)
    }

    fn bank(first: Self, last: Self, n: u16) -> Option<Self> {
        let flag = Self(first.0.checked_add(n)?);
        (flag <= last).then_some(flag)
    }

    /// True for flags of fitted modules.
    #[must_use]
    pub fn is_module_slot(self) -> bool {
        (Self::FIRST_MODULE_SLOT..=Self::LAST_MODULE_SLOT).contains(&self)
    }

    /// True for rig slots.
    #[must_use]
    pub fn is_rig_slot(self) -> bool {
        (Self::RIG_SLOT_0..=Self::RIG_SLOT_7).contains(&self)
    }

    /// Symbolic name for well-known flags.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::AUTOFIT => "autofit",
            Self::WALLET => "wallet",
            Self::FACTORY => "factory",
            Self::HANGAR => "hangar",
            Self::CARGO_HOLD => "cargo-hold",
            Self::BRIEFCASE => "briefcase",
            Self::SKILL => "skill",
            Self::REWARD => "reward",
            Self::CONNECTED => "connected",
            Self::DISCONNECTED => "disconnected",
            Self::FIXED_SLOT => "fixed-slot",
            Self::CAPSULE => "capsule",
            Self::PILOT => "pilot",
            Self::PASSENGER => "passenger",
            Self::BOARDING_GATE => "boarding-gate",
            Self::CREW => "crew",
            Self::SKILL_IN_TRAINING => "skill-in-training",
            Self::CORP_MARKET => "corp-market",
            Self::LOCKED => "locked",
            Self::UNLOCKED => "unlocked",
            Self::BONUS => "bonus",
            Self::DRONE_BAY => "drone-bay",
            Self::BOOSTER => "booster",
            Self::IMPLANT => "implant",
            Self::SHIP_HANGAR => "ship-hangar",
            Self::SHIP_OFFLINE => "ship-offline",
            Self::FACTORY_OPERATION => "factory-operation",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u16> for ItemFlag {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for ItemFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemFlag({})", self.0)
    }
}

impl fmt::Display for ItemFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        let banks = [
            ("low-slot", Self::LOW_SLOT_0, Self::LOW_SLOT_7),
            ("med-slot", Self::MED_SLOT_0, Self::MED_SLOT_7),
            ("hi-slot", Self::HI_SLOT_0, Self::HI_SLOT_7),
            ("rig-slot", Self::RIG_SLOT_0, Self::RIG_SLOT_7),
        ];
        for (label, first, last) in banks {
            if (first..=last).contains(self) {
                return write!(f, "{label}-{}", self.0 - first.0);
            }
        }
        write!(f, "flag-{}", self.0)
    }
}
