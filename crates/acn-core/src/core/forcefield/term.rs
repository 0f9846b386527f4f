use serde::Serialize;
use std::ops::{Add, AddAssign};

/// Potential energy of one evaluation, split by interaction type (eV).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EnergyTerm {
    /// Cut-off Coulomb energy between molecules.
    pub coulomb: f64,
    /// Cut-off Lennard-Jones energy between molecules.
    pub vdw: f64,
    /// Electrostatic energy with the external point-charge environment.
    pub embedding: f64,
}

impl EnergyTerm {
    pub fn new(coulomb: f64, vdw: f64, embedding: f64) -> Self {
        Self {
            coulomb,
            vdw,
            embedding,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.coulomb + self.vdw + self.embedding
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            coulomb: self.coulomb + rhs.coulomb,
            vdw: self.vdw + rhs.vdw,
            embedding: self.embedding + rhs.embedding,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.coulomb += rhs.coulomb;
        self.vdw += rhs.vdw;
        self.embedding += rhs.embedding;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_energy_term_with_specified_values() {
        let term = EnergyTerm::new(1.0, 2.0, 3.0);
        assert_eq!(term.coulomb, 1.0);
        assert_eq!(term.vdw, 2.0);
        assert_eq!(term.embedding, 3.0);
    }

    #[test]
    fn total_returns_sum_of_all_terms() {
        let term = EnergyTerm::new(-2.0, 1.5, 0.5);
        assert_eq!(term.total(), 0.0);
    }

    #[test]
    fn add_sums_each_field_correctly() {
        let result = EnergyTerm::new(1.0, 2.0, 3.0) + EnergyTerm::new(4.0, -5.0, 6.0);
        assert_eq!(result, EnergyTerm::new(5.0, -3.0, 9.0));
    }

    #[test]
    fn add_assign_with_default_does_not_change_values() {
        let mut a = EnergyTerm::new(1.0, 2.0, 3.0);
        a += EnergyTerm::default();
        assert_eq!(a, EnergyTerm::new(1.0, 2.0, 3.0));
    }
}
