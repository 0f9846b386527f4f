use super::species::{NITROGEN_ATOMIC_NUMBER, Species};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of interaction sites per molecule.
pub const SITES_PER_MOLECULE: usize = 3;

/// Offset of the central carbon within every triplet, whatever the layout.
pub const CARBON_OFFSET: usize = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Atom count {count} is not a multiple of 3")]
    AtomCountNotMultipleOfThree { count: usize },

    #[error("Start offset {offset} is out of range for {len} atoms")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error(
        "Not the correct atom sequence: atom {atom_index} should be {expected}, found atomic number {found}"
    )]
    SequenceMismatch {
        atom_index: usize,
        expected: Species,
        found: u8,
    },
}

/// Ordering of the three sites inside every molecule of a system.
///
/// A system uses one layout throughout; mixed orderings are rejected by [`MoleculeLayout::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoleculeLayout {
    /// `N, C, Me` repeating.
    #[default]
    NitrogenFirst,
    /// `Me, C, N` repeating.
    MethylFirst,
}

impl MoleculeLayout {
    /// Species occupying `offset` (0, 1 or 2) within a molecule.
    #[inline]
    pub const fn species_at(self, offset: usize) -> Species {
        match (self, offset) {
            (_, CARBON_OFFSET) => Species::Carbon,
            (MoleculeLayout::NitrogenFirst, 0) | (MoleculeLayout::MethylFirst, 2) => {
                Species::Nitrogen
            }
            _ => Species::Methyl,
        }
    }

    #[inline]
    pub const fn nitrogen_offset(self) -> usize {
        match self {
            MoleculeLayout::NitrogenFirst => 0,
            MoleculeLayout::MethylFirst => 2,
        }
    }

    #[inline]
    pub const fn methyl_offset(self) -> usize {
        match self {
            MoleculeLayout::NitrogenFirst => 2,
            MoleculeLayout::MethylFirst => 0,
        }
    }

    /// Infers the layout from the atom at `start`: nitrogen there means `N, C, Me`,
    /// anything else means `Me, C, N`.
    ///
    /// Detection alone proves nothing about the rest of the system; follow it with
    /// [`MoleculeLayout::validate`].
    pub fn detect(numbers: &[u8], start: usize) -> Result<Self, LayoutError> {
        let first = numbers
            .get(start)
            .ok_or(LayoutError::OffsetOutOfRange {
                offset: start,
                len: numbers.len(),
            })?;
        Ok(if *first == NITROGEN_ATOMIC_NUMBER {
            MoleculeLayout::NitrogenFirst
        } else {
            MoleculeLayout::MethylFirst
        })
    }

    /// Checks that every triplet from `start` to the end of `numbers` follows this layout.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: an out-of-range start, a trailing partial
    /// molecule, or the first atom whose atomic number does not match its site.
    pub fn validate(self, numbers: &[u8], start: usize) -> Result<(), LayoutError> {
        if start > numbers.len() {
            return Err(LayoutError::OffsetOutOfRange {
                offset: start,
                len: numbers.len(),
            });
        }
        let tail = &numbers[start..];
        if tail.len() % SITES_PER_MOLECULE != 0 {
            return Err(LayoutError::AtomCountNotMultipleOfThree { count: tail.len() });
        }

        for (i, &found) in tail.iter().enumerate() {
            let expected = self.species_at(i % SITES_PER_MOLECULE);
            if found != expected.atomic_number() {
                return Err(LayoutError::SequenceMismatch {
                    atom_index: start + i,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for MoleculeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoleculeLayout::NitrogenFirst => f.write_str("N-C-Me"),
            MoleculeLayout::MethylFirst => f.write_str("Me-C-N"),
        }
    }
}

impl FromStr for MoleculeLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "nitrogen-first" | "n-c-me" | "ncme" => Ok(MoleculeLayout::NitrogenFirst),
            "methyl-first" | "me-c-n" | "mecn" => Ok(MoleculeLayout::MethylFirst),
            other => Err(format!(
                "unknown molecule layout '{other}' (expected 'nitrogen-first' or 'methyl-first')"
            )),
        }
    }
}
