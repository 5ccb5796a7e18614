//! Value-to-color mapping on top of `colorgrad` preset gradients.

use colorgrad::Gradient as _;
use plotters::style::RGBColor;

/// A named gradient with optional reversal and linear normalization.
pub struct Colormap {
    gradient: Box<dyn colorgrad::Gradient>,
    reversed: bool,
}

impl Colormap {
    /// Red-blue diverging map, blue for low values (matplotlib `RdBu_r`).
    pub fn diverging() -> Self {
        Self {
            gradient: Box::new(colorgrad::preset::rd_bu()),
            reversed: true,
        }
    }

    /// Pink-green diverging map for Hovmüller diagrams.
    pub fn pink_green() -> Self {
        Self {
            gradient: Box::new(colorgrad::preset::pi_yg()),
            reversed: false,
        }
    }

    /// Sequential blue map.
    pub fn blues() -> Self {
        Self {
            gradient: Box::new(colorgrad::preset::blues()),
            reversed: false,
        }
    }

    /// Rainbow-like map for static surface plots.
    pub fn turbo() -> Self {
        Self {
            gradient: Box::new(colorgrad::preset::turbo()),
            reversed: false,
        }
    }

    /// Map `value` within `[vmin, vmax]` to a color. Values outside the
    /// range clip to the gradient ends; a degenerate range maps to the
    /// gradient midpoint.
    pub fn sample(&self, value: f64, vmin: f64, vmax: f64) -> RGBColor {
        let normalized = if vmax > vmin {
            ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let t = if self.reversed {
            1.0 - normalized
        } else {
            normalized
        };
        let rgba = self.gradient.at(t as f32).to_rgba8();
        RGBColor(rgba[0], rgba[1], rgba[2])
    }
}

impl std::fmt::Debug for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Colormap")
            .field("reversed", &self.reversed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_endpoints_differ() {
        let cmap = Colormap::diverging();
        let low = cmap.sample(-1.0, -1.0, 1.0);
        let high = cmap.sample(1.0, -1.0, 1.0);
        assert_ne!((low.0, low.1, low.2), (high.0, high.1, high.2));
        // Reversed RdBu: low values lean blue, high values lean red.
        assert!(low.2 > low.0);
        assert!(high.0 > high.2);
    }

    #[test]
    fn test_out_of_range_clips() {
        let cmap = Colormap::blues();
        let clipped = cmap.sample(10.0, 0.0, 1.0);
        let end = cmap.sample(1.0, 0.0, 1.0);
        assert_eq!((clipped.0, clipped.1, clipped.2), (end.0, end.1, end.2));
    }

    #[test]
    fn test_degenerate_range_uses_midpoint() {
        let cmap = Colormap::blues();
        let mid = cmap.sample(5.0, 1.0, 1.0);
        let expected = cmap.sample(0.5, 0.0, 1.0);
        assert_eq!((mid.0, mid.1, mid.2), (expected.0, expected.1, expected.2));
    }
}
