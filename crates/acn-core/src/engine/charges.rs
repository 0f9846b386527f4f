use super::error::PreconditionError;
use crate::core::forcefield::params::AcnParams;
use crate::core::models::layout::{MoleculeLayout, SITES_PER_MOLECULE};
use crate::core::models::snapshot::Snapshot;
use tracing::debug;

/// Writes the model's per-species charges onto every molecule from `offset` onwards.
///
/// The layout is detected from the atom at `offset` and then checked over every following
/// triplet. Atoms before `offset` (a solute, say) keep their charges. Nothing is written
/// unless the whole tail validates.
///
/// # Returns
///
/// The detected molecule layout.
pub fn assign_acn_charges(
    snapshot: &mut Snapshot,
    offset: usize,
    params: &AcnParams,
) -> Result<MoleculeLayout, PreconditionError> {
    let layout = MoleculeLayout::detect(snapshot.numbers(), offset)?;
    layout.validate(snapshot.numbers(), offset)?;

    let pattern: [f64; SITES_PER_MOLECULE] =
        std::array::from_fn(|site| params.site(layout.species_at(site)).charge);

    let tail = &mut snapshot.charges_mut()[offset..];
    for molecule in tail.chunks_exact_mut(SITES_PER_MOLECULE) {
        molecule.copy_from_slice(&pattern);
    }

    debug!(
        offset,
        %layout,
        molecules = tail.len() / SITES_PER_MOLECULE,
        "Assigned standard acetonitrile charges"
    );
    Ok(layout)
}
