use crate::core::forcefield::term::EnergyTerm;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A quantity a caller can request from an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Energy,
    Forces,
}

impl Property {
    pub const ALL: [Property; 2] = [Property::Energy, Property::Forces];
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Energy => write!(f, "energy"),
            Property::Forces => write!(f, "forces"),
        }
    }
}

impl FromStr for Property {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "energy" => Ok(Property::Energy),
            "forces" => Ok(Property::Forces),
            other => Err(format!("Unknown property '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Energy(f64),
    Forces(Vec<[f64; 3]>),
}

/// Output of the most recent successful evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Results {
    pub(crate) energy: EnergyTerm,
    pub(crate) forces: Vec<Vector3<f64>>,
    pub(crate) unconstrained_forces: Vec<Vector3<f64>>,
    pub(crate) pairs_in_range: usize,
}

impl Results {
    /// Total potential energy in eV.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy.total()
    }

    pub fn energy_terms(&self) -> &EnergyTerm {
        &self.energy
    }

    /// Forces after the rigid-body projection, in eV/Å. Carbon sites carry zero.
    pub fn forces(&self) -> &[Vector3<f64>] {
        &self.forces
    }

    /// Per-atom forces as if every site were a free particle, i.e. `-dE/dr`.
    pub fn unconstrained_forces(&self) -> &[Vector3<f64>] {
        &self.unconstrained_forces
    }

    /// Molecule pairs whose carbon-carbon distance fell inside the cutoff.
    pub fn pairs_in_range(&self) -> usize {
        self.pairs_in_range
    }

    /// The requested subset of properties, keyed and ordered by property.
    pub fn properties(&self, requested: &[Property]) -> BTreeMap<Property, PropertyValue> {
        requested
            .iter()
            .map(|&property| {
                let value = match property {
                    Property::Energy => PropertyValue::Energy(self.energy()),
                    Property::Forces => {
                        PropertyValue::Forces(self.forces.iter().map(|f| [f.x, f.y, f.z]).collect())
                    }
                };
                (property, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Results {
        Results {
            energy: EnergyTerm::new(-0.5, 0.25, 0.0),
            forces: vec![Vector3::new(1.0, 2.0, 3.0), Vector3::zeros()],
            unconstrained_forces: vec![Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0)],
            pairs_in_range: 1,
        }
    }

    #[test]
    fn energy_is_sum_of_terms() {
        assert_eq!(sample().energy(), -0.25);
    }

    #[test]
    fn properties_returns_only_requested_entries() {
        let map = sample().properties(&[Property::Energy]);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&Property::Energy], PropertyValue::Energy(-0.25));
    }

    #[test]
    fn properties_orders_energy_before_forces() {
        let map = sample().properties(&[Property::Forces, Property::Energy]);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![Property::Energy, Property::Forces]);
        assert_eq!(
            map[&Property::Forces],
            PropertyValue::Forces(vec![[1.0, 2.0, 3.0], [0.0, 0.0, 0.0]])
        );
    }

    #[test]
    fn property_parses_case_insensitively() {
        assert_eq!("Energy".parse::<Property>(), Ok(Property::Energy));
        assert_eq!("FORCES".parse::<Property>(), Ok(Property::Forces));
        assert!("stress".parse::<Property>().is_err());
    }
}
