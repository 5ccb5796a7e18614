//! One-sided magnitude spectrum of a real-valued signal.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Frequency bins and amplitudes of a one-sided spectrum.
#[derive(Clone, Debug)]
pub struct Spectrum {
    /// Bin center frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Amplitude per bin, normalized so a pure sinusoid of amplitude A
    /// shows up as A in its bin.
    pub amplitudes: Vec<f64>,
}

/// Compute the one-sided magnitude spectrum of the first `n` samples of
/// `signal`, recorded over `duration` seconds.
///
/// Bin `k` maps to `k / duration` Hz. The DC bin is normalized by `1/n`,
/// all others by `2/n`.
///
/// # Panics
///
/// Panics if `duration` is not positive.
pub fn magnitude_spectrum(signal: &[f64], n: usize, duration: f64) -> Spectrum {
    assert!(duration > 0.0, "signal duration must be positive");
    let n = n.min(signal.len());
    if n == 0 {
        return Spectrum {
            frequencies: Vec::new(),
            amplitudes: Vec::new(),
        };
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = signal[..n]
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .collect();
    fft.process(&mut buffer);

    let bins = n / 2 + 1;
    let mut frequencies = Vec::with_capacity(bins);
    let mut amplitudes = Vec::with_capacity(bins);
    for (k, value) in buffer.iter().take(bins).enumerate() {
        frequencies.push(k as f64 / duration);
        let scale = if k == 0 { 1.0 } else { 2.0 };
        amplitudes.push(scale * value.norm() / n as f64);
    }

    Spectrum {
        frequencies,
        amplitudes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_pure_sine_peaks_at_its_frequency() {
        // 4 Hz sine sampled 64 times over 1 second.
        let n = 64;
        let signal: Vec<f64> = (0..n)
            .map(|i| (TAU * 4.0 * i as f64 / n as f64).sin())
            .collect();
        let spectrum = magnitude_spectrum(&signal, n, 1.0);

        let (peak_bin, peak) = spectrum
            .amplitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert!((spectrum.frequencies[peak_bin] - 4.0).abs() < 1e-9);
        assert!((peak - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_dc_offset_in_zero_bin() {
        let signal = vec![2.5; 32];
        let spectrum = magnitude_spectrum(&signal, 32, 1.0);
        assert!((spectrum.amplitudes[0] - 2.5).abs() < 1e-9);
        assert!(spectrum.amplitudes[1..].iter().all(|&a| a < 1e-9));
    }

    #[test]
    fn test_empty_signal() {
        let spectrum = magnitude_spectrum(&[], 0, 1.0);
        assert!(spectrum.frequencies.is_empty());
        assert!(spectrum.amplitudes.is_empty());
    }

    #[test]
    fn test_bin_spacing_follows_duration() {
        let signal = vec![0.0; 16];
        let spectrum = magnitude_spectrum(&signal, 16, 4.0);
        assert!((spectrum.frequencies[1] - 0.25).abs() < 1e-12);
    }
}
