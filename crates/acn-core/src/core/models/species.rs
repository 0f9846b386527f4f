use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Atomic number of carbon, also used to label the united-atom methyl group.
pub const CARBON_ATOMIC_NUMBER: u8 = 6;
/// Atomic number of nitrogen.
pub const NITROGEN_ATOMIC_NUMBER: u8 = 7;

/// The three interaction sites of an acetonitrile molecule.
///
/// The methyl group is a united-atom pseudo-atom. Hosts label it with the atomic number of
/// carbon, so a site's species is decided by its position within the molecule rather than by
/// its atomic number alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// The CH3 united atom.
    Methyl,
    /// The central carbon.
    Carbon,
    /// The terminal nitrogen.
    Nitrogen,
}

impl Species {
    /// All species in parameter-array order.
    pub const ALL: [Species; 3] = [Species::Methyl, Species::Carbon, Species::Nitrogen];

    /// Index of this species in per-species parameter arrays ({Me, C, N}).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Species::Methyl => 0,
            Species::Carbon => 1,
            Species::Nitrogen => 2,
        }
    }

    /// Atomic number the host uses to label this site.
    #[inline]
    pub const fn atomic_number(self) -> u8 {
        match self {
            Species::Methyl | Species::Carbon => CARBON_ATOMIC_NUMBER,
            Species::Nitrogen => NITROGEN_ATOMIC_NUMBER,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Species::Methyl => "Me",
            Species::Carbon => "C",
            Species::Nitrogen => "N",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Species {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "me" | "methyl" | "ch3" => Ok(Species::Methyl),
            "c" | "carbon" => Ok(Species::Carbon),
            "n" | "nitrogen" => Ok(Species::Nitrogen),
            _ => Err(()),
        }
    }
}
