use nalgebra::DMatrix;

/// Lennard-Jones parameters of a single species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJonesParam {
    /// Diameter in Å.
    pub sigma: f64,
    /// Well depth in eV.
    pub epsilon: f64,
}

/// Pairwise Lennard-Jones parameters, indexed by species index on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMatrices {
    pub sigma: DMatrix<f64>,
    pub epsilon: DMatrix<f64>,
}

impl PairMatrices {
    #[inline]
    pub fn pair(&self, i: usize, j: usize) -> (f64, f64) {
        (self.sigma[(i, j)], self.epsilon[(i, j)])
    }
}

/// Mixes per-species parameters with the Lorentz-Berthelot rule:
/// arithmetic mean of σ, geometric mean of ε.
pub fn lorentz_berthelot(species: &[LennardJonesParam]) -> PairMatrices {
    let k = species.len();
    let sigma = DMatrix::from_fn(k, k, |i, j| (species[i].sigma + species[j].sigma) / 2.0);
    let epsilon =
        DMatrix::from_fn(k, k, |i, j| (species[i].epsilon * species[j].epsilon).sqrt());
    PairMatrices { sigma, epsilon }
}
