//! Combined time-series and magnitude-spectrum figure.

use plotters::prelude::*;

use super::RenderError;
use crate::analysis::magnitude_spectrum;
use crate::field::FieldError;

/// Write a two-panel figure to `path`: the signal over time on top, its
/// one-sided magnitude spectrum below.
///
/// The sample spacing is taken from the first two time entries; the
/// signal duration passed to the transform is `n * dt`.
pub fn timeseries_spectrum_figure(
    path: impl AsRef<std::path::Path>,
    times: &[f64],
    signal: &[f64],
    size: (u32, u32),
) -> Result<(), RenderError> {
    if times.len() != signal.len() {
        return Err(FieldError::LengthMismatch {
            times: times.len(),
            values: signal.len(),
        }
        .into());
    }
    if times.len() < 2 {
        return Err(RenderError::SignalTooShort(times.len()));
    }

    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::draw_err)?;
    let (upper, lower) = root.split_vertically(size.1 / 2);

    let (t0, t1) = (times[0], times[times.len() - 1]);
    let (s_lo, s_hi) = padded_range(signal);
    let mut chart = ChartBuilder::on(&upper)
        .caption("Time series of η at center of domain", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(t0..t1, s_lo..s_hi)
        .map_err(RenderError::draw_err)?;
    chart
        .configure_mesh()
        .x_desc("t [s]")
        .y_desc("η [m]")
        .draw()
        .map_err(RenderError::draw_err)?;
    chart
        .draw_series(LineSeries::new(
            times.iter().zip(signal).map(|(&t, &v)| (t, v)),
            BLUE.stroke_width(2),
        ))
        .map_err(RenderError::draw_err)?;

    let dt = times[1] - times[0];
    let spectrum = magnitude_spectrum(signal, signal.len(), signal.len() as f64 * dt);
    let f1 = spectrum.frequencies.last().copied().unwrap_or(1.0);
    let (a_lo, a_hi) = padded_range(&spectrum.amplitudes);
    let mut chart = ChartBuilder::on(&lower)
        .caption("Fourier transformed signal", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..f1, a_lo..a_hi)
        .map_err(RenderError::draw_err)?;
    chart
        .configure_mesh()
        .x_desc("Frequency [Hz]")
        .y_desc("Amplitude")
        .draw()
        .map_err(RenderError::draw_err)?;
    chart
        .draw_series(LineSeries::new(
            spectrum
                .frequencies
                .iter()
                .zip(&spectrum.amplitudes)
                .map(|(&f, &a)| (f, a)),
            BLUE.stroke_width(2),
        ))
        .map_err(RenderError::draw_err)?;

    root.present().map_err(RenderError::draw_err)?;
    Ok(())
}

/// Value range widened so flat signals still get a drawable axis.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo < hi {
        (lo, hi)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_length_mismatch() {
        let err = timeseries_spectrum_figure(
            "/nonexistent/s.png",
            &[0.0, 1.0],
            &[0.0, 1.0, 2.0],
            (100, 100),
        );
        assert!(matches!(err, Err(RenderError::Field(_))));
    }

    #[test]
    fn test_rejects_short_signal() {
        let err = timeseries_spectrum_figure("/nonexistent/s.png", &[0.0], &[1.0], (100, 100));
        assert!(matches!(err, Err(RenderError::SignalTooShort(1))));
    }

    #[test]
    fn test_padded_range_widens_flat_signal() {
        assert_eq!(padded_range(&[2.0, 2.0]), (1.0, 3.0));
        assert_eq!(padded_range(&[1.0, 3.0]), (1.0, 3.0));
    }
}
