//! Simulation configuration
//!
//! All parameters are fixed at construction and validated eagerly, so a bad
//! configuration fails before the first sample is drawn rather than deep in
//! the pipeline.

use crate::error::SimError;

/// Acquisition parameters of the respiration recordings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespParams {
    /// Sampling rate of the recordings in Hz
    pub sample_rate: f64,
    /// Duration of each recording in seconds
    pub max_time: f64,
}

/// Parameters of the phase-error simulation
///
/// `snr` and `amplitude` are `[min, max]` ranges sampled uniformly per call.
/// An `snr` max of 0 disables noise injection entirely; `rotation_max_deg`
/// of 0 and `flip_probability` of 0 disable the respective augmentations.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Repetition time in seconds: the readout cadence, one k-space line
    /// per TR
    pub tr: f64,
    /// Respiration recording parameters
    pub resp: RespParams,
    /// Signal-to-noise ratio range `[min, max]`
    pub snr: [f64; 2],
    /// Respiration amplitude range `[min, max]` applied to the scaled trace
    pub amplitude: [f64; 2],
    /// Phase normalization constant (frequency-shift scale in Hz times echo
    /// time in seconds)
    pub phase_const: f64,
    /// Maximum rotation magnitude in degrees; 0 disables rotation
    pub rotation_max_deg: f64,
    /// Probability of a horizontal flip; 0 disables flipping
    pub flip_probability: f64,
}

impl SimConfig {
    /// Create a configuration with both augmentations disabled
    pub fn new(
        tr: f64,
        resp: RespParams,
        snr: [f64; 2],
        amplitude: [f64; 2],
        phase_const: f64,
    ) -> Self {
        Self {
            tr,
            resp,
            snr,
            amplitude,
            phase_const,
            rotation_max_deg: 0.0,
            flip_probability: 0.0,
        }
    }

    /// Enable random rotation up to `max_deg` degrees in either direction
    pub fn with_rotation(mut self, max_deg: f64) -> Self {
        self.rotation_max_deg = max_deg;
        self
    }

    /// Enable horizontal flipping with the given probability
    pub fn with_flip(mut self, probability: f64) -> Self {
        self.flip_probability = probability;
        self
    }

    /// Validate every parameter against the given output size (image side
    /// length, which is also the number of k-space lines per readout).
    ///
    /// # Errors
    /// `SimError::InvalidConfig` naming the offending parameter.
    pub fn validate(&self, output_size: usize) -> Result<(), SimError> {
        if !(self.tr > 0.0) || !self.tr.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "TR must be positive and finite, got {}",
                self.tr
            )));
        }
        if !(self.resp.sample_rate > 0.0) || !self.resp.sample_rate.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "sample_rate must be positive and finite, got {}",
                self.resp.sample_rate
            )));
        }
        if !self.resp.max_time.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "max_time must be finite, got {}",
                self.resp.max_time
            )));
        }

        // The start-time window [0, max_time - TR*N - 1/fs) must be non-empty,
        // otherwise the recording cannot cover one full readout.
        let readout = self.tr * output_size as f64;
        let span = self.resp.max_time - readout - 1.0 / self.resp.sample_rate;
        if span <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "max_time {} s is too short for a {} s readout ({} lines at TR {} s)",
                self.resp.max_time, readout, output_size, self.tr
            )));
        }

        if self.snr[0] > self.snr[1] {
            return Err(SimError::InvalidConfig(format!(
                "SNR range [{}, {}] has min > max",
                self.snr[0], self.snr[1]
            )));
        }
        // Noise enabled: a zero or negative minimum SNR would make the noise
        // std unbounded.
        if self.snr[1] > 0.0 && self.snr[0] <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "SNR min must be positive when noise is enabled, got {}",
                self.snr[0]
            )));
        }

        if self.amplitude[0] > self.amplitude[1] {
            return Err(SimError::InvalidConfig(format!(
                "amplitude range [{}, {}] has min > max",
                self.amplitude[0], self.amplitude[1]
            )));
        }
        if !self.phase_const.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "phase_const must be finite, got {}",
                self.phase_const
            )));
        }
        if self.rotation_max_deg < 0.0 || !self.rotation_max_deg.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "rotation_max_deg must be non-negative, got {}",
                self.rotation_max_deg
            )));
        }
        if !(0.0..=1.0).contains(&self.flip_probability) {
            return Err(SimError::InvalidConfig(format!(
                "flip_probability must be in [0, 1], got {}",
                self.flip_probability
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SimConfig {
        SimConfig::new(
            0.005,
            RespParams {
                sample_rate: 50.0,
                max_time: 300.0,
            },
            [20.0, 50.0],
            [0.5, 1.5],
            0.04,
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate(224).is_ok());
    }

    #[test]
    fn test_recording_too_short() {
        let mut cfg = base_config();
        cfg.resp.max_time = 1.0; // 224 lines at 5 ms need > 1.12 s
        let err = cfg.validate(224).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_nonpositive_tr_rejected() {
        let mut cfg = base_config();
        cfg.tr = 0.0;
        assert!(cfg.validate(224).is_err());
        cfg.tr = -0.005;
        assert!(cfg.validate(224).is_err());
    }

    #[test]
    fn test_nonpositive_sample_rate_rejected() {
        let mut cfg = base_config();
        cfg.resp.sample_rate = 0.0;
        assert!(cfg.validate(224).is_err());
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let mut cfg = base_config();
        cfg.snr = [50.0, 20.0];
        assert!(cfg.validate(224).is_err());

        let mut cfg = base_config();
        cfg.amplitude = [1.5, 0.5];
        assert!(cfg.validate(224).is_err());
    }

    #[test]
    fn test_zero_snr_min_with_noise_rejected() {
        let mut cfg = base_config();
        cfg.snr = [0.0, 50.0];
        assert!(cfg.validate(224).is_err());
    }

    #[test]
    fn test_noiseless_snr_range_accepted() {
        let mut cfg = base_config();
        cfg.snr = [0.0, 0.0];
        assert!(cfg.validate(224).is_ok());
    }

    #[test]
    fn test_flip_probability_bounds() {
        let cfg = base_config().with_flip(1.0);
        assert!(cfg.validate(224).is_ok());
        let cfg = base_config().with_flip(1.5);
        assert!(cfg.validate(224).is_err());
    }

    #[test]
    fn test_negative_rotation_rejected() {
        let cfg = base_config().with_rotation(-10.0);
        assert!(cfg.validate(224).is_err());
    }
}
