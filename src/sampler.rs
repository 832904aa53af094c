//! Temporal sampler
//!
//! Draws a random respiration subject and start time, resamples the recording
//! at the readout cadence (one sample per TR) and rescales the segment so its
//! peak magnitude equals a randomly drawn amplitude. The scaled segment drives
//! the per-line phase error and doubles as the training label.

use crate::config::RespParams;
use crate::corpus::RespirationCorpus;
use crate::error::SimError;
use rand::Rng;

/// One drawn respiration segment
#[derive(Debug, Clone)]
pub struct TemporalSegment {
    /// Respiration subject the segment was taken from
    pub subject: usize,
    /// Window start within the recording, in seconds
    pub start_time: f64,
    /// Drawn peak amplitude
    pub amplitude: f64,
    /// Respiration values as recorded, one per k-space line
    pub raw: Vec<f64>,
    /// Raw values rescaled so `max(|scaled|) == amplitude`
    pub scaled: Vec<f64>,
}

/// Draw one respiration segment of `output_size` samples.
///
/// The start time is uniform over `[0, max_time - TR*N - 1/sample_rate)`,
/// the subject uniform over the corpus, and the amplitude uniform over
/// `amplitude_range`. Offsets are linearly spaced over one full readout
/// (endpoint included) and rounded to the nearest recording sample.
///
/// # Errors
/// - `SimError::SegmentOutOfBounds` if a rounded time index falls outside the
///   recording (the eager config validation makes this unreachable in a
///   correctly constructed simulator).
/// - `SimError::DegenerateSignal` if the drawn segment is entirely zero.
pub fn draw_segment<R: Rng + ?Sized>(
    rng: &mut R,
    resp: &RespirationCorpus,
    params: &RespParams,
    tr: f64,
    output_size: usize,
    amplitude_range: [f64; 2],
) -> Result<TemporalSegment, SimError> {
    let readout = tr * output_size as f64;
    let span = params.max_time - readout - 1.0 / params.sample_rate;
    let start_time = span * rng.gen::<f64>();

    let amplitude = rng.gen_range(amplitude_range[0]..=amplitude_range[1]);
    let subject = rng.gen_range(0..resp.num_subjects());
    let recording = resp.subject(subject);

    // linspace(start, start + readout, N), endpoint included
    let mut raw = Vec::with_capacity(output_size);
    for n in 0..output_size {
        let t = if output_size > 1 {
            start_time + readout * n as f64 / (output_size - 1) as f64
        } else {
            start_time
        };
        let idx = (t * params.sample_rate).round();
        if idx < 0.0 || idx as usize >= recording.len() {
            return Err(SimError::SegmentOutOfBounds {
                index: idx.max(0.0) as usize,
                len: recording.len(),
            });
        }
        raw.push(recording[idx as usize]);
    }

    let max_abs = raw.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
    if max_abs == 0.0 {
        return Err(SimError::DegenerateSignal {
            subject,
            len: output_size,
        });
    }

    let scaled: Vec<f64> = raw.iter().map(|&v| v / max_abs * amplitude).collect();

    Ok(TemporalSegment {
        subject,
        start_time,
        amplitude,
        raw,
        scaled,
    })
}
