//! Challenge icons.
//!
//! A character carries up to three icons (military, intrigue, power) that
//! decide which challenges it may join. Effects add and remove icons; the
//! printed icons are kept alongside so the client can show what changed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A challenge icon, also used as the challenge type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Military,
    Intrigue,
    Power,
}

impl Icon {
    /// Canonical ordering used for listings.
    pub const ALL: [Icon; 3] = [Icon::Military, Icon::Intrigue, Icon::Power];

    const fn slot(self) -> usize {
        match self {
            Icon::Military => 0,
            Icon::Intrigue => 1,
            Icon::Power => 2,
        }
    }
}

impl FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "military" => Ok(Icon::Military),
            "intrigue" => Ok(Icon::Intrigue),
            "power" => Ok(Icon::Power),
            other => Err(format!("unknown icon: {other}")),
        }
    }
}

pub type IconList = SmallVec<[Icon; 3]>;

/// Live icon counts plus the printed icons they started from.
///
/// Counts are signed: a removal layered over an addition can take a count
/// below zero, and the icon is present only while its count is positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icons {
    counts: [i32; 3],
    printed: [bool; 3],
}

impl Icons {
    /// Seed counts from the printed flags.
    #[must_use]
    pub fn from_printed(military: bool, intrigue: bool, power: bool) -> Self {
        let printed = [military, intrigue, power];
        Self {
            counts: printed.map(i32::from),
            printed,
        }
    }

    #[must_use]
    pub fn has(&self, icon: Icon) -> bool {
        self.counts[icon.slot()] > 0
    }

    #[must_use]
    pub fn is_printed(&self, icon: Icon) -> bool {
        self.printed[icon.slot()]
    }

    #[must_use]
    pub fn count(&self, icon: Icon) -> i32 {
        self.counts[icon.slot()]
    }

    pub fn add(&mut self, icon: Icon) {
        self.counts[icon.slot()] += 1;
    }

    pub fn remove(&mut self, icon: Icon) {
        self.counts[icon.slot()] -= 1;
    }

    /// Icons currently present, in canonical order.
    #[must_use]
    pub fn present(&self) -> IconList {
        Icon::ALL.into_iter().filter(|&i| self.has(i)).collect()
    }

    /// Icons present now but not printed.
    #[must_use]
    pub fn added(&self) -> IconList {
        Icon::ALL
            .into_iter()
            .filter(|&i| self.has(i) && !self.is_printed(i))
            .collect()
    }

    /// Icons printed but not present now.
    #[must_use]
    pub fn removed(&self) -> IconList {
        Icon::ALL
            .into_iter()
            .filter(|&i| !self.has(i) && self.is_printed(i))
            .collect()
    }
}
