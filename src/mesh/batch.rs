//! Parallel per-snapshot mesh extraction.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::Array2;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::isosurface::extract_isosurface;
use super::obj::write_obj;
use super::sdf::HeightFieldSdf;
use super::{BoundingBox, MeshError};

/// What to do when one snapshot's extraction fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop scheduling remaining tasks on the first failure and return
    /// it. In-flight siblings run to completion; queued tasks never
    /// start. The default.
    #[default]
    Abort,
    /// Run every task; collect failures per snapshot index in the
    /// report.
    Continue,
}

/// Shared counter of completed snapshots, observable while a batch runs.
#[derive(Clone, Debug, Default)]
pub struct Progress(Arc<AtomicUsize>);

impl Progress {
    /// Number of snapshots extracted so far.
    pub fn completed(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Worker pool size: host parallelism, capped at 64.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(64)
}

/// Configuration for a mesh extraction batch.
#[derive(Clone, Debug)]
pub struct ExtractionConfig {
    /// Target voxel count along the longest bounding box axis.
    pub resolution: usize,
    /// Worker pool size. Defaults to [`default_workers`]; set to 1 for
    /// deterministic sequential execution.
    pub max_workers: usize,
    /// Failure handling. Defaults to [`FailurePolicy::Abort`].
    pub failure_policy: FailurePolicy,
    progress: Progress,
}

impl ExtractionConfig {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            max_workers: default_workers(),
            failure_policy: FailurePolicy::default(),
            progress: Progress::default(),
        }
    }

    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Handle to the completion counter for this batch.
    pub fn progress(&self) -> Progress {
        self.progress.clone()
    }
}

/// Outcome of a mesh extraction batch.
#[derive(Debug, Default)]
pub struct MeshSeriesReport {
    /// Number of mesh files written.
    pub written: usize,
    /// Failures per snapshot index, ordered by index. Empty under
    /// [`FailurePolicy::Abort`] (the first failure is returned as the
    /// batch error instead).
    pub failures: Vec<(usize, MeshError)>,
}

/// Extract one mesh per snapshot into `out_dir/mesh_{index:08}.obj`,
/// fanned out over a bounded worker pool.
///
/// Every snapshot must match the shape of the first; each task validates
/// its own input so a bad snapshot only fails that task. The output
/// directory is created up front (idempotently); filenames are disjoint
/// per index so workers never contend.
pub fn extract_mesh_series(
    snapshots: &[Array2<f64>],
    bounds: &BoundingBox,
    config: &ExtractionConfig,
    out_dir: &Path,
) -> Result<MeshSeriesReport, MeshError> {
    if snapshots.is_empty() {
        return Ok(MeshSeriesReport::default());
    }
    let expected = snapshots[0].dim();
    std::fs::create_dir_all(out_dir)?;

    let steps = bounds.grid_resolution(config.resolution);
    let workers = config.max_workers.max(1);
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    log::info!(
        "extracting {} meshes at steps {:?} with {} workers",
        snapshots.len(),
        steps,
        workers
    );

    let progress = &config.progress;
    match config.failure_policy {
        FailurePolicy::Abort => {
            pool.install(|| {
                snapshots.par_iter().enumerate().try_for_each(|(i, eta)| {
                    extract_one(i, eta, expected, bounds, steps, out_dir).map_err(|e| {
                        MeshError::Task {
                            index: i,
                            source: Box::new(e),
                        }
                    })?;
                    progress.increment();
                    Ok::<(), MeshError>(())
                })
            })?;
            Ok(MeshSeriesReport {
                written: snapshots.len(),
                failures: Vec::new(),
            })
        }
        FailurePolicy::Continue => {
            let mut failures: Vec<(usize, MeshError)> = pool.install(|| {
                snapshots
                    .par_iter()
                    .enumerate()
                    .filter_map(|(i, eta)| {
                        match extract_one(i, eta, expected, bounds, steps, out_dir) {
                            Ok(()) => {
                                progress.increment();
                                None
                            }
                            Err(e) => Some((i, e)),
                        }
                    })
                    .collect()
            });
            failures.sort_by_key(|(i, _)| *i);
            Ok(MeshSeriesReport {
                written: snapshots.len() - failures.len(),
                failures,
            })
        }
    }
}

fn extract_one(
    index: usize,
    eta: &Array2<f64>,
    expected: (usize, usize),
    bounds: &BoundingBox,
    steps: [usize; 3],
    out_dir: &Path,
) -> Result<(), MeshError> {
    let dim = eta.dim();
    if dim.0 == 0 || dim.1 == 0 {
        return Err(MeshError::EmptyField);
    }
    if dim != expected {
        return Err(MeshError::ShapeMismatch {
            index,
            expected,
            got: dim,
        });
    }

    let sdf = HeightFieldSdf::new(eta, *bounds);
    let mesh = extract_isosurface(&sdf, bounds, steps);
    let path = out_dir.join(format!("mesh_{index:08}.obj"));
    write_obj(&mesh, &path)?;
    log::debug!(
        "wrote {} ({} triangles)",
        path.display(),
        mesh.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_batch_is_a_noop() {
        let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        let config = ExtractionConfig::new(8);
        let dir = tempdir().unwrap();
        let out = dir.path().join("meshes");

        let report = extract_mesh_series(&[], &bounds, &config, &out).unwrap();
        assert_eq!(report.written, 0);
        // Directory is only created once there is work to do.
        assert!(!out.exists());
    }

    #[test]
    fn test_default_workers_capped() {
        assert!(default_workers() >= 1);
        assert!(default_workers() <= 64);
    }

    #[test]
    fn test_config_defaults() {
        let config = ExtractionConfig::new(32);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.progress().completed(), 0);
    }
}
