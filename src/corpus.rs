//! In-memory image and respiration corpora
//!
//! Both corpora are loaded by the caller and handed over as flat arrays with
//! explicit dimensions; the simulator only ever reads them. Images are stored
//! as one contiguous row-major block per sample, respiration recordings as
//! one contiguous block per subject.

use crate::error::SimError;
use num_complex::Complex64;

/// Complex-valued image corpus, logically indexed `[row, col, sample]`.
///
/// All images share the same square spatial dimensions; the side length
/// doubles as the simulator's `output_size`.
#[derive(Debug)]
pub struct ImageCorpus {
    data: Vec<Complex64>,
    side: usize,
    num_images: usize,
}

impl ImageCorpus {
    /// Create a corpus from flat data laid out sample-by-sample, each sample
    /// row-major with shape `(side, side)`.
    ///
    /// # Errors
    /// `SimError::CorpusMismatch` if the data length does not equal
    /// `side * side * num_images`, or the corpus is empty.
    pub fn new(data: Vec<Complex64>, side: usize, num_images: usize) -> Result<Self, SimError> {
        if side == 0 || num_images == 0 {
            return Err(SimError::CorpusMismatch(
                "image corpus must contain at least one non-empty image".to_string(),
            ));
        }
        let expected = side * side * num_images;
        if data.len() != expected {
            return Err(SimError::CorpusMismatch(format!(
                "image data has {} elements, expected {} ({}x{}x{})",
                data.len(),
                expected,
                side,
                side,
                num_images
            )));
        }
        Ok(Self {
            data,
            side,
            num_images,
        })
    }

    /// Number of images along the sample axis
    pub fn len(&self) -> usize {
        self.num_images
    }

    pub fn is_empty(&self) -> bool {
        self.num_images == 0
    }

    /// Side length of every (square) image
    pub fn side(&self) -> usize {
        self.side
    }

    /// Borrow one image as a contiguous row-major slice
    ///
    /// Panics if `index >= len()`; callers bounds-check first.
    pub fn image(&self, index: usize) -> &[Complex64] {
        let n = self.side * self.side;
        &self.data[index * n..(index + 1) * n]
    }
}

/// Real-valued respiration corpus, indexed `[subject, time_sample]`.
///
/// Every subject's recording has the same length, sampled at a fixed rate
/// for a fixed duration (see `RespParams`).
#[derive(Debug)]
pub struct RespirationCorpus {
    data: Vec<f64>,
    num_subjects: usize,
    samples_per_subject: usize,
}

impl RespirationCorpus {
    /// Create a corpus from flat data laid out subject-by-subject.
    ///
    /// # Errors
    /// `SimError::CorpusMismatch` if the data length does not equal
    /// `num_subjects * samples_per_subject`, or the corpus is empty.
    pub fn new(
        data: Vec<f64>,
        num_subjects: usize,
        samples_per_subject: usize,
    ) -> Result<Self, SimError> {
        if num_subjects == 0 || samples_per_subject == 0 {
            return Err(SimError::CorpusMismatch(
                "respiration corpus must contain at least one non-empty recording".to_string(),
            ));
        }
        let expected = num_subjects * samples_per_subject;
        if data.len() != expected {
            return Err(SimError::CorpusMismatch(format!(
                "respiration data has {} elements, expected {} ({} subjects x {} samples)",
                data.len(),
                expected,
                num_subjects,
                samples_per_subject
            )));
        }
        Ok(Self {
            data,
            num_subjects,
            samples_per_subject,
        })
    }

    pub fn num_subjects(&self) -> usize {
        self.num_subjects
    }

    pub fn samples_per_subject(&self) -> usize {
        self.samples_per_subject
    }

    /// Borrow one subject's full recording
    pub fn subject(&self, subject: usize) -> &[f64] {
        let n = self.samples_per_subject;
        &self.data[subject * n..(subject + 1) * n]
    }
}
