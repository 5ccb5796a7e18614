//! Isosurface mesh extraction from height field snapshots.
//!
//! This module provides:
//! - [`BoundingBox`]: the sampled volume with per-axis voxel resolution
//!   derived proportionally from the physical extents
//! - [`HeightFieldSdf`]: the vertical signed-distance proxy
//!   `eta(x, y) - z` over a snapshot
//! - [`extract_isosurface`]: zero-level triangulation of a scalar field
//! - [`write_obj`]: plain-text OBJ output
//! - [`extract_mesh_series`]: the parallel per-snapshot batch
//!
//! Snapshots are independent, so the batch fans out over a bounded worker
//! pool; each task owns its output file exclusively (filenames are keyed
//! by snapshot index).
//!
//! # Example
//!
//! ```ignore
//! use swe_viz::mesh::{extract_mesh_series, BoundingBox, ExtractionConfig};
//!
//! let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0])?;
//! let config = ExtractionConfig::new(100).with_max_workers(8);
//! let report = extract_mesh_series(&snapshots, &bounds, &config, "out/meshes".as_ref())?;
//! println!("{} meshes written", report.written);
//! ```

mod batch;
mod isosurface;
mod obj;
mod sdf;

pub use batch::{
    default_workers, extract_mesh_series, ExtractionConfig, FailurePolicy, MeshSeriesReport,
    Progress,
};
pub use isosurface::{extract_isosurface, ScalarField3, TriangleMesh};
pub use obj::write_obj;
pub use sdf::HeightFieldSdf;

use thiserror::Error;

/// Error type for mesh extraction.
#[derive(Debug, Error)]
pub enum MeshError {
    /// I/O error while writing a mesh file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bounding box with a non-positive extent on some axis.
    #[error("invalid bounding box: min {min:?} must be strictly below max {max:?}")]
    InvalidBounds { min: [f64; 3], max: [f64; 3] },

    /// A snapshot disagrees with the shape of the first snapshot.
    #[error("snapshot {index} has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A snapshot with no cells.
    #[error("height field snapshot is empty")]
    EmptyField,

    /// The rayon worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// A batch task failed.
    #[error("mesh extraction failed for snapshot {index}: {source}")]
    Task {
        index: usize,
        #[source]
        source: Box<MeshError>,
    },
}

/// Axis-aligned sampling volume for isosurface extraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: [f64; 3],
    max: [f64; 3],
}

impl BoundingBox {
    /// Create a box from its min and max corners.
    ///
    /// Fails unless `max` is strictly above `min` on every axis.
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Result<Self, MeshError> {
        let valid = min
            .iter()
            .zip(&max)
            .all(|(lo, hi)| lo.is_finite() && hi.is_finite() && hi > lo);
        if !valid {
            return Err(MeshError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Minimum corner.
    pub fn min(&self) -> [f64; 3] {
        self.min
    }

    /// Maximum corner.
    pub fn max(&self) -> [f64; 3] {
        self.max
    }

    /// Physical extent per axis.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Extent of the longest axis.
    pub fn longest_extent(&self) -> f64 {
        let e = self.extent();
        e[0].max(e[1]).max(e[2])
    }

    /// Voxel steps per axis for a target resolution along the longest
    /// axis, proportional to each axis extent (truncating). A very
    /// short axis can end up with zero steps, which yields an empty
    /// mesh downstream.
    pub fn grid_resolution(&self, resolution: usize) -> [usize; 3] {
        let longest = self.longest_extent();
        let e = self.extent();
        [
            (resolution as f64 / longest * e[0]) as usize,
            (resolution as f64 / longest * e[1]) as usize,
            (resolution as f64 / longest * e[2]) as usize,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(matches!(
            BoundingBox::new([0.0, 0.0, 1.0], [1.0, 1.0, 0.0]),
            Err(MeshError::InvalidBounds { .. })
        ));
        assert!(matches!(
            BoundingBox::new([0.0, 0.0, 0.0], [1.0, 0.0, 1.0]),
            Err(MeshError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_resolution_proportional_to_extent() {
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]).unwrap();
        assert_eq!(bounds.grid_resolution(8), [8, 4, 4]);

        let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        assert_eq!(bounds.grid_resolution(8), [4, 4, 8]);
    }

    #[test]
    fn test_resolution_truncates() {
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [3.0, 1.0, 1.0]).unwrap();
        // 10 / 3 truncates to 3 on the short axes.
        assert_eq!(bounds.grid_resolution(10), [10, 3, 3]);
    }
}
