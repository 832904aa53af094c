//! Common test utilities for respsim-core integration tests

use num_complex::Complex64;
use respsim_core::config::{RespParams, SimConfig};
use respsim_core::corpus::{ImageCorpus, RespirationCorpus};

/// A smooth synthetic "anatomy": a complex Gaussian blob with a phase ramp,
/// different per sample so images are distinguishable.
pub fn synthetic_images(side: usize, num_images: usize) -> ImageCorpus {
    let mut data = Vec::with_capacity(side * side * num_images);
    let center = (side as f64 - 1.0) / 2.0;
    for s in 0..num_images {
        let width = side as f64 / (4.0 + s as f64);
        for r in 0..side {
            for c in 0..side {
                let dr = r as f64 - center;
                let dc = c as f64 - center;
                let mag = (-(dr * dr + dc * dc) / (2.0 * width * width)).exp();
                let phase = 0.02 * (dr + 2.0 * dc);
                data.push(Complex64::from_polar(mag, phase));
            }
        }
    }
    ImageCorpus::new(data, side, num_images).unwrap()
}

/// Breathing-like respiration recordings: slow sinusoid plus a drift term
pub fn synthetic_respiration(
    num_subjects: usize,
    sample_rate: f64,
    max_time: f64,
) -> RespirationCorpus {
    let samples = (max_time * sample_rate).ceil() as usize;
    let mut data = Vec::with_capacity(num_subjects * samples);
    for s in 0..num_subjects {
        let breath_hz = 0.2 + 0.05 * s as f64;
        for i in 0..samples {
            let t = i as f64 / sample_rate;
            data.push((2.0 * std::f64::consts::PI * breath_hz * t).sin() + 0.1 * (0.01 * t).sin());
        }
    }
    RespirationCorpus::new(data, num_subjects, samples).unwrap()
}

/// Recordings pinned to one constant value, for global-phase tests
pub fn constant_respiration(value: f64, sample_rate: f64, max_time: f64) -> RespirationCorpus {
    let samples = (max_time * sample_rate).ceil() as usize;
    RespirationCorpus::new(vec![value; samples], 1, samples).unwrap()
}

/// Default test configuration: noiseless, augmentation disabled
pub fn base_config(sample_rate: f64, max_time: f64) -> SimConfig {
    SimConfig::new(
        0.005,
        RespParams {
            sample_rate,
            max_time,
        },
        [0.0, 0.0],
        [0.5, 1.5],
        0.04,
    )
}

/// Maximum absolute value of a slice
pub fn max_abs(values: &[f32]) -> f32 {
    values.iter().fold(0.0f32, |m, &v| m.max(v.abs()))
}

/// Population standard deviation of complex magnitudes
pub fn magnitude_std(img: &[Complex64]) -> f64 {
    let count = img.len() as f64;
    let mean = img.iter().map(|v| v.norm()).sum::<f64>() / count;
    let var = img
        .iter()
        .map(|v| {
            let d = v.norm() - mean;
            d * d
        })
        .sum::<f64>()
        / count;
    var.sqrt()
}
