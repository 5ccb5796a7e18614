//! Vertical signed-distance proxy over a height field snapshot.

use ndarray::Array2;

use super::isosurface::ScalarField3;
use super::BoundingBox;
use crate::field::nearest_index;

/// Samples `eta(x, y) - z` over a bounding box.
///
/// The (x, y) point maps to the nearest height-field cell by proportional
/// index scaling. The result is sign-correct at the surface but is not a
/// metric distance field.
///
/// Captures the snapshot and box by value/reference at construction, so
/// each extraction task is self-contained.
#[derive(Clone, Copy, Debug)]
pub struct HeightFieldSdf<'a> {
    eta: &'a Array2<f64>,
    bounds: BoundingBox,
}

impl<'a> HeightFieldSdf<'a> {
    pub fn new(eta: &'a Array2<f64>, bounds: BoundingBox) -> Self {
        Self { eta, bounds }
    }
}

impl ScalarField3 for HeightFieldSdf<'_> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (nx, ny) = self.eta.dim();
        let min = self.bounds.min();
        let max = self.bounds.max();
        let i = nearest_index(x, min[0], max[0], nx);
        let j = nearest_index(y, min[1], max[1], ny);
        self.eta[[i, j]] - z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_surface_samples() {
        // eta sampled on a 5x5 grid over [0,1]^2; binary-exact cell
        // coordinates keep the index map exact.
        let eta = Array2::from_shape_fn((5, 5), |(i, j)| 0.125 * i as f64 - 0.25 * j as f64);
        let bounds = BoundingBox::new([0.0, 0.0, -2.0], [1.0, 1.0, 2.0]).unwrap();
        let sdf = HeightFieldSdf::new(&eta, bounds);

        for i in 0..5 {
            for j in 0..5 {
                let x = i as f64 / 4.0;
                let y = j as f64 / 4.0;
                assert_eq!(sdf.sample(x, y, eta[[i, j]]), 0.0);
            }
        }
    }

    #[test]
    fn test_sign_above_and_below_surface() {
        let eta = Array2::from_elem((3, 3), 0.5);
        let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        let sdf = HeightFieldSdf::new(&eta, bounds);

        assert!(sdf.sample(0.5, 0.5, 0.0) > 0.0);
        assert!(sdf.sample(0.5, 0.5, 0.9) < 0.0);
    }
}
