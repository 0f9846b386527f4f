//! Constants of the working unit system: Å, eV, e, amu.

/// Coulomb constant `e² / (4πε₀)` in eV·Å/e², equal to Hartree·Bohr (CODATA 2014).
pub const COULOMB_CONSTANT: f64 = 14.399_645_351_950_543;

/// One kJ/mol expressed in eV (CODATA 2014).
pub const KJ_PER_MOL: f64 = 1.0 / 96.485_332_89;

/// Standard atomic weights in amu (IUPAC 2016).
pub const HYDROGEN_MASS: f64 = 1.008;
pub const CARBON_MASS: f64 = 12.011;
pub const NITROGEN_MASS: f64 = 14.007;

/// Mass of the CH3 united atom.
pub const METHYL_MASS: f64 = CARBON_MASS + 3.0 * HYDROGEN_MASS;
