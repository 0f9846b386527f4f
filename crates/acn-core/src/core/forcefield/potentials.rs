use super::units::COULOMB_CONSTANT;

// Each potential returns `(energy, prefactor)`, where the force on the second site of a pair
// separated by `D` (pointing from the first site to the second) is `prefactor * D`.

#[inline]
pub fn coulomb(r2: f64, q1: f64, q2: f64) -> (f64, f64) {
    let energy = COULOMB_CONSTANT * q1 * q2 / r2.sqrt();
    (energy, energy / r2)
}

#[inline]
pub fn lennard_jones_12_6(r2: f64, sigma: f64, epsilon: f64) -> (f64, f64) {
    let c6 = (sigma * sigma / r2).powi(3);
    let c12 = c6 * c6;
    let energy = 4.0 * epsilon * (c12 - c6);
    let prefactor = 24.0 * epsilon * (2.0 * c12 - c6) / r2;
    (energy, prefactor)
}
