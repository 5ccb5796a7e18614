//! Spectral analysis helpers for probe time series.
//!
//! The model writes out elevation probes at fixed locations; this module
//! turns such a series into a one-sided magnitude spectrum for the
//! combined time-series/spectrum figure.

mod fourier;

pub use fourier::{magnitude_spectrum, Spectrum};
