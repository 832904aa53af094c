//! Per-index sample simulation
//!
//! `Simulator` owns the two corpora and the configuration and produces one
//! independently randomized training pair per call: a `[2, N, N]` real/imag
//! feature tensor of the corrupted image, and the amplitude-scaled
//! respiration trace that generated the phase error as the label.
//!
//! The simulator holds no mutable state; randomness comes either from the
//! thread-local generator (`sample`) or from a caller-supplied one
//! (`sample_with`), so concurrent sampling from multiple workers is safe.

use crate::augment;
use crate::config::SimConfig;
use crate::corpus::{ImageCorpus, RespirationCorpus};
use crate::error::SimError;
use crate::kspace;
use crate::sampler;
use num_complex::Complex64;
use rand::Rng;

/// One simulated training pair
#[derive(Debug, Clone)]
pub struct Sample {
    features: Vec<f32>,
    label: Vec<f32>,
    output_size: usize,
}

impl Sample {
    /// Packed feature tensor, shape `[2, output_size, output_size]` flattened
    /// in C order: channel 0 is the real part, channel 1 the imaginary part.
    pub fn features(&self) -> &[f32] {
        &self.features
    }

    /// One channel of the feature tensor as a contiguous row-major image
    pub fn channel(&self, channel: usize) -> &[f32] {
        let n = self.output_size * self.output_size;
        &self.features[channel * n..(channel + 1) * n]
    }

    /// Amplitude-scaled respiration trace, length `output_size`
    pub fn label(&self) -> &[f32] {
        &self.label
    }

    /// Tensor shape `[2, output_size, output_size]`
    pub fn shape(&self) -> [usize; 3] {
        [2, self.output_size, self.output_size]
    }
}

/// Respiration phase-error simulator over an image corpus
#[derive(Debug)]
pub struct Simulator {
    images: ImageCorpus,
    resp: RespirationCorpus,
    config: SimConfig,
}

impl Simulator {
    /// Create a simulator, validating the configuration against both corpora.
    ///
    /// # Errors
    /// - `SimError::InvalidConfig` for any out-of-range parameter (see
    ///   `SimConfig::validate`).
    /// - `SimError::CorpusMismatch` if the respiration recordings are shorter
    ///   than `max_time * sample_rate` samples.
    pub fn new(
        images: ImageCorpus,
        resp: RespirationCorpus,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        config.validate(images.side())?;

        let needed = config.resp.max_time * config.resp.sample_rate;
        if (resp.samples_per_subject() as f64) < needed {
            return Err(SimError::CorpusMismatch(format!(
                "respiration recordings have {} samples, but max_time {} s at {} Hz needs {}",
                resp.samples_per_subject(),
                config.resp.max_time,
                config.resp.sample_rate,
                needed.ceil()
            )));
        }

        Ok(Self {
            images,
            resp,
            config,
        })
    }

    /// Number of images in the corpus, and thus of sampleable indices
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Side length of the packed output channels
    pub fn output_size(&self) -> usize {
        self.images.side()
    }

    /// Simulate one sample using the thread-local random generator
    pub fn sample(&self, index: usize) -> Result<Sample, SimError> {
        self.sample_with(index, &mut rand::thread_rng())
    }

    /// Simulate one sample with a caller-supplied random generator.
    ///
    /// Re-requesting the same index draws a fresh respiration window, SNR
    /// and augmentation, so two calls generally differ; determinism is
    /// available by passing a seeded generator.
    ///
    /// # Errors
    /// - `SimError::IndexOutOfRange` if `index >= len()`.
    /// - `SimError::DegenerateSignal` if the drawn respiration segment is
    ///   entirely zero.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<Sample, SimError> {
        if index >= self.len() {
            return Err(SimError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        let n = self.output_size();
        let cfg = &self.config;

        let segment = sampler::draw_segment(
            rng,
            &self.resp,
            &cfg.resp,
            cfg.tr,
            n,
            cfg.amplitude,
        )?;

        let img = self.images.image(index).to_vec();
        let img = augment::augment(rng, img, n, n, cfg.rotation_max_deg, cfg.flip_probability);

        let corrupted =
            kspace::corrupt(rng, &img, n, n, &segment.scaled, cfg.phase_const, cfg.snr)?;

        Ok(pack(&corrupted, &segment.scaled, n))
    }
}

/// Normalize the corrupted image by 4x the standard deviation of its
/// magnitude and pack it into the `[2, N, N]` f32 tensor.
fn pack(corrupted: &[Complex64], scaled_trace: &[f64], n: usize) -> Sample {
    let count = corrupted.len() as f64;
    let mean = corrupted.iter().map(|v| v.norm()).sum::<f64>() / count;
    let var = corrupted
        .iter()
        .map(|v| {
            let d = v.norm() - mean;
            d * d
        })
        .sum::<f64>()
        / count;
    let sd = var.sqrt();

    // An all-zero image has zero spread and stays zero
    let scale = if sd > 0.0 { 1.0 / (4.0 * sd) } else { 1.0 };

    let plane = n * n;
    let mut features = vec![0.0f32; 2 * plane];
    for (i, v) in corrupted.iter().enumerate() {
        features[i] = (v.re * scale) as f32;
        features[plane + i] = (v.im * scale) as f32;
    }

    let label = scaled_trace.iter().map(|&v| v as f32).collect();

    Sample {
        features,
        label,
        output_size: n,
    }
}
