//! Hovmüller (space-time) diagrams of a 1D spatial slice over time.

use ndarray::Array2;
use plotters::prelude::*;

use super::{Colormap, RenderError};
use crate::field::FieldError;

/// Write a Hovmüller diagram to `path`: x on the horizontal axis, time on
/// the vertical axis.
///
/// `values` holds one row per time entry, `values[[k, i]]` being the
/// slice value at `times[k]`, `x[i]`. Color bounds span the data range.
pub fn hovmuller_figure(
    path: impl AsRef<std::path::Path>,
    x: &[f64],
    times: &[f64],
    values: &Array2<f64>,
    size: (u32, u32),
) -> Result<(), RenderError> {
    if values.dim() != (times.len(), x.len()) {
        return Err(FieldError::GridMismatch {
            expected: (times.len(), x.len()),
            got: values.dim(),
        }
        .into());
    }
    if x.len() < 2 || times.len() < 2 {
        return Err(RenderError::SignalTooShort(x.len().min(times.len())));
    }

    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::draw_err)?;

    let (x0, x1) = (x[0], x[x.len() - 1]);
    let (t0, t1) = (times[0], times[times.len() - 1]);
    let mut chart = ChartBuilder::on(&root)
        .caption("x-t plot for middle of domain", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, t0..t1)
        .map_err(RenderError::draw_err)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x [m]")
        .y_desc("t [s]")
        .draw()
        .map_err(RenderError::draw_err)?;

    let (vmin, vmax) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let colormap = Colormap::pink_green();
    chart
        .draw_series(
            (0..times.len() - 1)
                .flat_map(|k| (0..x.len() - 1).map(move |i| (k, i)))
                .map(|(k, i)| {
                    let color = colormap.sample(values[[k, i]], vmin, vmax);
                    Rectangle::new([(x[i], times[k]), (x[i + 1], times[k + 1])], color.filled())
                }),
        )
        .map_err(RenderError::draw_err)?;
    root.present().map_err(RenderError::draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_shape_mismatch() {
        let x = vec![0.0, 1.0, 2.0];
        let t = vec![0.0, 1.0];
        let values = Array2::zeros((3, 3));
        let err = hovmuller_figure("/nonexistent/h.png", &x, &t, &values, (100, 100));
        assert!(matches!(err, Err(RenderError::Field(_))));
    }

    #[test]
    fn test_rejects_single_sample_axes() {
        let x = vec![0.0];
        let t = vec![0.0, 1.0];
        let values = Array2::zeros((2, 1));
        let err = hovmuller_figure("/nonexistent/h.png", &x, &t, &values, (100, 100));
        assert!(matches!(err, Err(RenderError::SignalTooShort(1))));
    }
}
