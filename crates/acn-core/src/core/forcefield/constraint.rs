use super::params::AcnParams;
use crate::core::models::layout::{CARBON_OFFSET, MoleculeLayout, SITES_PER_MOLECULE};
use nalgebra::Vector3;

/// Force projection for a rigid linear triatomic whose middle site follows the two ends
/// (Ciccotti, Ferrario and Ryckaert, Molecular Physics, 1982).
///
/// The carbon position is fixed at `C_Me * r_Me + C_N * r_N`. Given forces on all three sites,
/// [`RigidLinearConstraint::redistribute`] returns forces on the nitrogen and methyl sites that,
/// applied to those sites with their own masses, reproduce the constrained motion of the whole
/// molecule. The carbon site receives no force of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidLinearConstraint {
    /// `r_CN / r_MeN`, the weight of the methyl position in the carbon position.
    c_me: f64,
    /// `r_MeC / r_MeN`, the weight of the nitrogen position in the carbon position.
    c_n: f64,
    m_cn: f64,
    m_mec: f64,
    m_men: f64,
    n_me: f64,
    n_n: f64,
    mass_methyl: f64,
    mass_carbon: f64,
    mass_nitrogen: f64,
}

impl RigidLinearConstraint {
    pub fn new(params: &AcnParams) -> Self {
        let r_me_n = params.bond_methyl_nitrogen();
        let c_me = params.bond_carbon_nitrogen / r_me_n;
        let c_n = params.bond_methyl_carbon / r_me_n;

        let (m_me, m_c, m_n) = (params.methyl.mass, params.carbon.mass, params.nitrogen.mass);
        let m_cn = m_c * m_n;
        let m_mec = m_c * m_me;
        let m_men = m_n * m_me;

        // Determinant of the 2x2 mass matrix of the two free ends.
        let det = c_me * c_me * m_cn + c_n * c_n * m_mec + m_men;

        Self {
            c_me,
            c_n,
            m_cn,
            m_mec,
            m_men,
            n_me: c_me / det,
            n_n: c_n / det,
            mass_methyl: m_me,
            mass_carbon: m_c,
            mass_nitrogen: m_n,
        }
    }

    /// Bond-length ratios `(C_Me, C_N)`.
    pub fn position_weights(&self) -> (f64, f64) {
        (self.c_me, self.c_n)
    }

    /// Redistributes the forces of every molecule onto its terminal sites.
    ///
    /// `forces` must hold whole molecules in `layout` order; a trailing partial molecule is
    /// dropped from the output (callers validate the atom count beforehand).
    ///
    /// The carbon output is zero, and the plain sum of a molecule's three output forces is
    /// in general *not* its input sum: the carbon is carried by the terminal sites through
    /// the constraint, so the conserved quantity is [`Self::rigid_body_force`] together with
    /// the rigid-body torque. Integrate these forces with the constrained equations of
    /// motion, not as free particles.
    pub fn redistribute(
        &self,
        layout: MoleculeLayout,
        forces: &[Vector3<f64>],
    ) -> Vec<Vector3<f64>> {
        let n = layout.nitrogen_offset();
        let me = layout.methyl_offset();

        let mut out = Vec::with_capacity(forces.len());
        for molecule in forces.chunks_exact(SITES_PER_MOLECULE) {
            let (f_n, f_me, f_c) = (molecule[n], molecule[me], molecule[CARBON_OFFSET]);

            let new_n = f_n * (1.0 - self.n_n * self.m_mec * self.c_n)
                - f_me * (self.n_n * self.m_cn * self.c_me)
                + f_c * (self.n_n * self.m_men);
            let new_me = f_me * (1.0 - self.n_me * self.m_cn * self.c_me)
                - f_n * (self.n_me * self.m_mec * self.c_n)
                + f_c * (self.n_me * self.m_men);

            let mut triplet = [Vector3::zeros(); SITES_PER_MOLECULE];
            triplet[n] = new_n;
            triplet[me] = new_me;
            out.extend_from_slice(&triplet);
        }
        out
    }

    /// Rate of change of the molecule's total momentum implied by redistributed forces:
    /// the forces on the ends plus the inertial share of the carbon that rides along.
    pub fn rigid_body_force(
        &self,
        layout: MoleculeLayout,
        molecule: &[Vector3<f64>],
    ) -> Vector3<f64> {
        let f_n = molecule[layout.nitrogen_offset()];
        let f_me = molecule[layout.methyl_offset()];
        let carbon_acceleration =
            f_me * (self.c_me / self.mass_methyl) + f_n * (self.c_n / self.mass_nitrogen);
        f_n + f_me + carbon_acceleration * self.mass_carbon
    }
}
