/// Smooth cutoff applied to the molecule-pair distance.
///
/// Inside `radius - width` the weight is one, beyond `radius` it is zero, and across the shell
/// it follows the cubic smoothstep `1 - y²(3 - 2y)` with `y = (d - radius + width) / width`.
/// Value and first derivative are continuous at both shell boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothCutoff {
    pub radius: f64,
    pub width: f64,
}

impl SmoothCutoff {
    pub fn new(radius: f64, width: f64) -> Self {
        Self { radius, width }
    }

    /// Distance below which the weight is exactly one.
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.radius - self.width
    }

    /// Returns the weight and its derivative with respect to `d`.
    #[inline]
    pub fn evaluate(&self, d: f64) -> (f64, f64) {
        if d >= self.radius {
            (0.0, 0.0)
        } else if d <= self.inner_radius() {
            (1.0, 0.0)
        } else {
            let y = (d - self.inner_radius()) / self.width;
            let weight = 1.0 - y * y * (3.0 - 2.0 * y);
            let derivative = -6.0 / self.width * y * (1.0 - y);
            (weight, derivative)
        }
    }

    /// Evaluates the switch over a slice of distances.
    pub fn evaluate_all(&self, distances: &[f64]) -> (Vec<f64>, Vec<f64>) {
        distances.iter().map(|&d| self.evaluate(d)).unzip()
    }
}
