//! # swe-viz
//!
//! Visualization toolkit for precomputed 2D shallow water model output.
//!
//! Strictly presentation: given snapshot sequences of surface elevation
//! and velocity plus the domain grid, this crate produces:
//! - Animated heatmap, quiver, and 3D surface views, rendered frame by
//!   frame into PNG files and assembled into an MP4 container
//! - Isosurface triangle meshes of the water surface, one OBJ file per
//!   snapshot, extracted in parallel
//! - Static diagnostic figures: surface, colormap, quiver, Hovmüller
//!   diagram, and a combined time-series/spectrum panel
//!
//! There is no simulation here and no retry logic; shape mismatches and
//! I/O failures surface immediately as errors.

pub mod analysis;
pub mod field;
pub mod mesh;
pub mod render;
pub mod video;

// Re-export main types for convenience
pub use analysis::{magnitude_spectrum, Spectrum};
pub use field::{DomainGrid, FieldError, ScalarSequence, VectorSequence};
pub use mesh::{
    default_workers, extract_isosurface, extract_mesh_series, write_obj, BoundingBox,
    ExtractionConfig, FailurePolicy, HeightFieldSdf, MeshError, MeshSeriesReport, Progress,
    ScalarField3, TriangleMesh,
};
pub use render::{
    heatmap_figure, hovmuller_figure, quiver_figure, surface_figure, timeseries_spectrum_figure,
    Colormap, FramePlot, HeatmapAnimation, QuiverAnimation, RenderError, SurfaceAnimation,
};
pub use video::{
    render_animation, AnimationConfig, AnimationSummary, FrameSink, Mp4Writer, VideoError,
};
