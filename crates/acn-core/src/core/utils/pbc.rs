use nalgebra::Vector3;

/// Returns the correction that maps `displacement` onto its minimum image.
///
/// Along every periodic axis `displacement + shift` lies in `[-L/2, L/2)`; non-periodic axes
/// get a zero correction. `lengths` holds the edge lengths of an orthorhombic cell.
#[inline]
pub fn minimum_image_shift(
    displacement: &Vector3<f64>,
    lengths: &Vector3<f64>,
    pbc: [bool; 3],
) -> Vector3<f64> {
    let mut shift = Vector3::zeros();
    for axis in 0..3 {
        if pbc[axis] {
            let d = displacement[axis];
            let half = lengths[axis] / 2.0;
            shift[axis] = (d + half).rem_euclid(lengths[axis]) - half - d;
        }
    }
    shift
}

/// Applies [`minimum_image_shift`] to every displacement.
pub fn wrap(
    displacements: &[Vector3<f64>],
    lengths: &Vector3<f64>,
    pbc: [bool; 3],
) -> Vec<Vector3<f64>> {
    displacements
        .iter()
        .map(|d| minimum_image_shift(d, lengths, pbc))
        .collect()
}
