//! Input data model for visualization pipelines.
//!
//! The shallow water model hands over its results as plain arrays; this
//! module wraps them in validated types:
//! - [`DomainGrid`]: two same-shaped meshgrid coordinate arrays (x, y)
//! - [`ScalarSequence`]: time-ordered surface elevation snapshots
//! - [`VectorSequence`]: time-ordered velocity component snapshots
//!
//! All shape checks happen at construction or at pipeline entry. Shape
//! mismatches are fatal and never auto-corrected.
//!
//! # Conventions
//!
//! Axis 0 of every array is the x direction, axis 1 the y direction, so
//! `eta[[i, j]]` sits at `(x[[i, j]], y[[i, j]])`.
//!
//! # Example
//!
//! ```ignore
//! use ndarray::Array2;
//! use swe_viz::field::{DomainGrid, ScalarSequence};
//!
//! let grid = DomainGrid::new(x, y)?;
//! let eta = ScalarSequence::new(snapshots, 30.0)?;
//! eta.validate_against(&grid)?;
//! ```

use ndarray::Array2;
use thiserror::Error;

/// Error type for input data validation.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Coordinate arrays of a grid disagree in shape.
    #[error("coordinate arrays have mismatched shapes: x is {x:?}, y is {y:?}")]
    GridShapeMismatch {
        x: (usize, usize),
        y: (usize, usize),
    },

    /// The domain grid has no cells.
    #[error("domain grid is empty")]
    EmptyGrid,

    /// A snapshot disagrees with the shape of the first snapshot.
    #[error("snapshot {index} has shape {got:?}, expected {expected:?}")]
    SnapshotShapeMismatch {
        index: usize,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A sequence does not match the domain grid it is rendered over.
    #[error("sequence shape {got:?} does not match grid shape {expected:?}")]
    GridMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Velocity component lists have different lengths.
    #[error("velocity components have different lengths: u has {u}, v has {v}")]
    ComponentLengthMismatch { u: usize, v: usize },

    /// Parallel time/value arrays have different lengths.
    #[error("times and values have different lengths: {times} vs {values}")]
    LengthMismatch { times: usize, values: usize },

    /// The inter-frame interval is not a positive finite number.
    #[error("snapshot interval must be positive and finite, got {0}")]
    InvalidInterval(f64),
}

/// Physical cell positions of the model domain.
///
/// Holds the two meshgrid arrays produced by the simulator. Constant
/// across a whole snapshot sequence.
#[derive(Clone, Debug)]
pub struct DomainGrid {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl DomainGrid {
    /// Create a grid from two coordinate arrays.
    ///
    /// Fails if the arrays disagree in shape or are empty.
    pub fn new(x: Array2<f64>, y: Array2<f64>) -> Result<Self, FieldError> {
        if x.dim() != y.dim() {
            return Err(FieldError::GridShapeMismatch {
                x: x.dim(),
                y: y.dim(),
            });
        }
        let (nx, ny) = x.dim();
        if nx == 0 || ny == 0 {
            return Err(FieldError::EmptyGrid);
        }
        Ok(Self { x, y })
    }

    /// Grid shape as (nx, ny).
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// X coordinate array.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Y coordinate array.
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Minimum and maximum x coordinate.
    pub fn x_range(&self) -> (f64, f64) {
        min_max(self.x.iter().copied())
    }

    /// Minimum and maximum y coordinate.
    pub fn y_range(&self) -> (f64, f64) {
        min_max(self.y.iter().copied())
    }

    /// X coordinates along axis 0 (at the first y column).
    pub fn x_axis(&self) -> Vec<f64> {
        (0..self.shape().0).map(|i| self.x[[i, 0]]).collect()
    }

    /// Y coordinates along axis 1 (at the first x row).
    pub fn y_axis(&self) -> Vec<f64> {
        (0..self.shape().1).map(|j| self.y[[0, j]]).collect()
    }
}

/// Time-ordered scalar field snapshots with a fixed inter-frame interval.
#[derive(Clone, Debug)]
pub struct ScalarSequence {
    frames: Vec<Array2<f64>>,
    dt: f64,
}

impl ScalarSequence {
    /// Create a sequence from snapshots and the interval (seconds)
    /// between consecutive entries.
    ///
    /// All snapshots must share the shape of the first one.
    pub fn new(frames: Vec<Array2<f64>>, dt: f64) -> Result<Self, FieldError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(FieldError::InvalidInterval(dt));
        }
        validate_uniform(&frames)?;
        Ok(Self { frames, dt })
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the sequence holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Interval between consecutive snapshots, in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Snapshot shape, or `None` for an empty sequence.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.frames.first().map(|f| f.dim())
    }

    /// Snapshot at `index`.
    pub fn frame(&self, index: usize) -> &Array2<f64> {
        &self.frames[index]
    }

    /// All snapshots in time order.
    pub fn frames(&self) -> &[Array2<f64>] {
        &self.frames
    }

    /// The mid-sequence snapshot, used as the representative frame for
    /// color scaling. `None` for an empty sequence.
    pub fn mid_frame(&self) -> Option<&Array2<f64>> {
        self.frames.get(self.frames.len() / 2)
    }

    /// Check the sequence shape against a domain grid.
    pub fn validate_against(&self, grid: &DomainGrid) -> Result<(), FieldError> {
        match self.shape() {
            Some(shape) if shape != grid.shape() => Err(FieldError::GridMismatch {
                expected: grid.shape(),
                got: shape,
            }),
            _ => Ok(()),
        }
    }
}

/// Time-ordered velocity component snapshots with a fixed interval.
#[derive(Clone, Debug)]
pub struct VectorSequence {
    u: Vec<Array2<f64>>,
    v: Vec<Array2<f64>>,
    dt: f64,
}

impl VectorSequence {
    /// Create a sequence from parallel u/v snapshot lists.
    pub fn new(u: Vec<Array2<f64>>, v: Vec<Array2<f64>>, dt: f64) -> Result<Self, FieldError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(FieldError::InvalidInterval(dt));
        }
        if u.len() != v.len() {
            return Err(FieldError::ComponentLengthMismatch {
                u: u.len(),
                v: v.len(),
            });
        }
        validate_uniform(&u)?;
        if let (Some(first), Some(vf)) = (u.first(), v.first()) {
            if first.dim() != vf.dim() {
                return Err(FieldError::SnapshotShapeMismatch {
                    index: 0,
                    expected: first.dim(),
                    got: vf.dim(),
                });
            }
        }
        validate_uniform(&v)?;
        Ok(Self { u, v, dt })
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.u.len()
    }

    /// True when the sequence holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// Interval between consecutive snapshots, in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Snapshot shape, or `None` for an empty sequence.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.u.first().map(|f| f.dim())
    }

    /// Velocity components at `index`.
    pub fn frame(&self, index: usize) -> (&Array2<f64>, &Array2<f64>) {
        (&self.u[index], &self.v[index])
    }

    /// Check the sequence shape against a domain grid.
    pub fn validate_against(&self, grid: &DomainGrid) -> Result<(), FieldError> {
        match self.shape() {
            Some(shape) if shape != grid.shape() => Err(FieldError::GridMismatch {
                expected: grid.shape(),
                got: shape,
            }),
            _ => Ok(()),
        }
    }
}

fn validate_uniform(frames: &[Array2<f64>]) -> Result<(), FieldError> {
    let Some(first) = frames.first() else {
        return Ok(());
    };
    let expected = first.dim();
    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.dim() != expected {
            return Err(FieldError::SnapshotShapeMismatch {
                index,
                expected,
                got: frame.dim(),
            });
        }
    }
    Ok(())
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Map a physical coordinate to the nearest array index by proportional
/// scaling, truncating toward zero. Clamped against floating point
/// overshoot at the upper bound.
pub(crate) fn nearest_index(value: f64, min: f64, max: f64, len: usize) -> usize {
    if len <= 1 || max <= min {
        return 0;
    }
    let t = (value - min) / (max - min);
    let idx = ((len - 1) as f64 * t) as isize;
    idx.clamp(0, (len - 1) as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meshgrid(nx: usize, ny: usize) -> (Array2<f64>, Array2<f64>) {
        let x = Array2::from_shape_fn((nx, ny), |(i, _)| i as f64);
        let y = Array2::from_shape_fn((nx, ny), |(_, j)| j as f64);
        (x, y)
    }

    #[test]
    fn test_grid_rejects_shape_mismatch() {
        let (x, _) = meshgrid(4, 4);
        let (_, y) = meshgrid(4, 5);
        assert!(matches!(
            DomainGrid::new(x, y),
            Err(FieldError::GridShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_grid_axes() {
        let (x, y) = meshgrid(3, 5);
        let grid = DomainGrid::new(x, y).unwrap();
        assert_eq!(grid.x_axis(), vec![0.0, 1.0, 2.0]);
        assert_eq!(grid.y_axis(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.x_range(), (0.0, 2.0));
    }

    #[test]
    fn test_scalar_sequence_rejects_nonuniform_shapes() {
        let frames = vec![Array2::zeros((3, 3)), Array2::zeros((3, 4))];
        let err = ScalarSequence::new(frames, 1.0).unwrap_err();
        assert!(matches!(
            err,
            FieldError::SnapshotShapeMismatch { index: 1, .. }
        ));
    }

    #[test]
    fn test_scalar_sequence_rejects_bad_interval() {
        let frames = vec![Array2::zeros((2, 2))];
        assert!(matches!(
            ScalarSequence::new(frames.clone(), 0.0),
            Err(FieldError::InvalidInterval(_))
        ));
        assert!(matches!(
            ScalarSequence::new(frames, f64::NAN),
            Err(FieldError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_sequence_grid_validation() {
        let (x, y) = meshgrid(3, 3);
        let grid = DomainGrid::new(x, y).unwrap();
        let good = ScalarSequence::new(vec![Array2::zeros((3, 3))], 1.0).unwrap();
        assert!(good.validate_against(&grid).is_ok());

        let bad = ScalarSequence::new(vec![Array2::zeros((2, 2))], 1.0).unwrap();
        assert!(matches!(
            bad.validate_against(&grid),
            Err(FieldError::GridMismatch { .. })
        ));
    }

    #[test]
    fn test_vector_sequence_rejects_component_mismatch() {
        let u = vec![Array2::zeros((2, 2)); 2];
        let v = vec![Array2::zeros((2, 2)); 3];
        assert!(matches!(
            VectorSequence::new(u, v, 1.0),
            Err(FieldError::ComponentLengthMismatch { u: 2, v: 3 })
        ));
    }

    #[test]
    fn test_mid_frame() {
        let frames = vec![
            Array2::from_elem((2, 2), 0.0),
            Array2::from_elem((2, 2), 1.0),
            Array2::from_elem((2, 2), 2.0),
        ];
        let seq = ScalarSequence::new(frames, 1.0).unwrap();
        assert_eq!(seq.mid_frame().unwrap()[[0, 0]], 1.0);
    }

    #[test]
    fn test_nearest_index_exact_at_samples() {
        // Binary-exact fractions keep the proportional map exact.
        for i in 0..5 {
            let x = i as f64 / 4.0;
            assert_eq!(nearest_index(x, 0.0, 1.0, 5), i);
        }
    }

    #[test]
    fn test_nearest_index_clamps() {
        assert_eq!(nearest_index(2.0, 0.0, 1.0, 5), 4);
        assert_eq!(nearest_index(-1.0, 0.0, 1.0, 5), 0);
        assert_eq!(nearest_index(0.5, 0.0, 0.0, 5), 0);
    }
}
