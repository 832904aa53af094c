//! respsim-core: respiration phase-error simulation for MRI training data
//!
//! Synthesizes corrupted complex-valued MRI images for training models that
//! correct respiration-induced phase errors. Each sample maps a random
//! respiration segment to a per-line k-space phase error, applies it in the
//! Fourier domain, injects SNR-calibrated complex Gaussian noise and packs
//! the normalized result into a `[2, N, N]` real/imaginary tensor together
//! with the phase-error trace as label.
//!
//! # Modules
//! - `fft`: 2D FFT operations using rustfft
//! - `corpus`: in-memory image and respiration corpora
//! - `config`: simulation parameters, validated at construction
//! - `sampler`: respiration segment drawing and amplitude rescaling
//! - `augment`: random rotation and horizontal flip
//! - `kspace`: per-line phase corruption and noise injection
//! - `simulator`: the per-index sampling pipeline

pub mod augment;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fft;
pub mod kspace;
pub mod sampler;
pub mod simulator;
