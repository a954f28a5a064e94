//! One-sided amplitude spectrum of a real signal.
//!
//! The transform runs on the samples exactly as read: no window, no
//! detrending, no zero-padding.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::data::filter::BandFilter;
use crate::data::model::{Spectrum, SpectrumPoint};
use crate::error::{ComputeError, InputError, ToolError};

/// Check a sampling rate before it reaches the transform.
pub fn validate_sample_rate(fs: f64) -> Result<f64, InputError> {
    if fs.is_finite() && fs > 0.0 {
        Ok(fs)
    } else {
        Err(InputError::InvalidSampleRate(fs))
    }
}

/// Frequency of DFT bin `k` for an `n`-point transform, in the usual FFT
/// ordering: bins past the midpoint map to negative frequencies.
fn bin_frequency(k: usize, n: usize, fs: f64) -> f64 {
    let signed = if k <= n.saturating_sub(1) / 2 {
        k as f64
    } else {
        k as f64 - n as f64
    };
    signed * fs / n as f64
}

/// Compute the non-negative-frequency half of the spectrum.
///
/// Magnitude is `|X_k| * 2 / n` for every kept bin, including DC, so the DC
/// term reads twice the signal mean.
pub fn positive_spectrum(signal: &[f64], fs: f64) -> Result<Spectrum, ComputeError> {
    let n = signal.len();
    if n == 0 {
        return Err(ComputeError::EmptySignal);
    }

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let scale = 2.0 / n as f64;
    let points: Vec<SpectrumPoint> = buffer
        .iter()
        .enumerate()
        .map(|(k, c)| SpectrumPoint {
            frequency: bin_frequency(k, n, fs),
            magnitude: c.norm() * scale,
        })
        .filter(|p| p.frequency >= 0.0)
        .collect();

    Ok(Spectrum {
        points,
        sample_rate: fs,
        sample_count: n,
    })
}

/// Full extraction: transform, keep non-negative bins, then clip to the band.
pub fn extract_spectrum(signal: &[f64], fs: f64, band: &BandFilter) -> Result<Spectrum, ToolError> {
    let fs = validate_sample_rate(fs)?;
    let mut spectrum = positive_spectrum(signal, fs)?;
    let before = spectrum.len();
    spectrum.points = band.apply(spectrum.points);

    log::debug!(
        "{} samples at {fs} Hz -> {before} bins, {} after band filter",
        signal.len(),
        spectrum.len()
    );
    Ok(spectrum)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn sine(f0: f64, fs: f64, n: usize, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * f0 * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn bin_ordering_matches_fft_convention() {
        let freqs: Vec<f64> = (0..4).map(|k| bin_frequency(k, 4, 4.0)).collect();
        assert_eq!(freqs, vec![0.0, 1.0, -2.0, -1.0]);

        let freqs: Vec<f64> = (0..5).map(|k| bin_frequency(k, 5, 5.0)).collect();
        assert_eq!(freqs, vec![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn bin_frequency_tolerates_zero_length() {
        assert_eq!(bin_frequency(0, 1, 10.0), 0.0);
        assert!(bin_frequency(0, 0, 10.0).is_nan());
    }

    #[test]
    fn point_count_is_half_rounded_up() {
        for n in 1..12 {
            let spectrum = positive_spectrum(&vec![1.0; n], 100.0).unwrap();
            assert_eq!(spectrum.len(), n.div_ceil(2), "n = {n}");
        }
    }

    #[test]
    fn sinusoid_peak_lands_on_its_bin() {
        let fs = 1000.0;
        let n = 1000;
        let spectrum = positive_spectrum(&sine(50.0, fs, n, 2.0), fs).unwrap();
        let peak = spectrum.peak().unwrap();

        assert!((peak.frequency - 50.0).abs() <= spectrum.bin_width());
        assert!((peak.magnitude - 2.0).abs() < 1e-9);
    }

    #[test]
    fn dc_is_double_scaled() {
        let spectrum = positive_spectrum(&[3.0; 8], 8.0).unwrap();
        assert!((spectrum.points[0].magnitude - 6.0).abs() < 1e-12);
        assert!(spectrum.points[1..].iter().all(|p| p.magnitude < 1e-12));
    }

    #[test]
    fn zero_signal_has_zero_magnitude() {
        let spectrum = positive_spectrum(&[0.0; 64], 10.0).unwrap();
        assert!(spectrum.points.iter().all(|p| p.magnitude == 0.0));
    }

    #[test]
    fn single_sample_is_one_dc_point() {
        let spectrum = positive_spectrum(&[1.5], 10.0).unwrap();
        assert_eq!(spectrum.len(), 1);
        assert_eq!(spectrum.points[0].frequency, 0.0);
        assert!((spectrum.points[0].magnitude - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_signal_fails() {
        assert!(matches!(
            positive_spectrum(&[], 10.0),
            Err(ComputeError::EmptySignal)
        ));
    }

    #[test]
    fn band_narrowing_never_adds_points() {
        let fs = 100.0;
        let signal = sine(12.0, fs, 200, 1.0);
        let mut last = usize::MAX;
        for (lo, hi) in [(0.0, 50.0), (5.0, 40.0), (10.0, 20.0), (12.0, 12.0)] {
            let band = BandFilter::new(Some(lo), Some(hi)).unwrap();
            let spectrum = extract_spectrum(&signal, fs, &band).unwrap();
            assert!(spectrum.len() <= last);
            assert!(spectrum
                .points
                .iter()
                .all(|p| p.frequency >= lo && p.frequency <= hi));
            last = spectrum.len();
        }
    }

    #[test]
    fn bad_sample_rate_is_an_input_error() {
        let err = extract_spectrum(&[1.0, 2.0], 0.0, &BandFilter::default()).unwrap_err();
        assert!(matches!(err, ToolError::Input(InputError::InvalidSampleRate(_))));
    }
}
