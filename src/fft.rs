//! FFT wrapper for 2D transforms using rustfft
//!
//! Provides 2D FFT/IFFT operations compatible with NumPy's FFT conventions
//! (forward unnormalized, inverse carries 1/N), plus fftshift/ifftshift for
//! the centered k-space convention. Data is stored in row-major order.

use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};
use std::sync::Arc;

/// Index into a 2D array stored in row-major order
/// index = col + row*n_cols
#[inline(always)]
pub fn idx2d(row: usize, col: usize, n_cols: usize) -> usize {
    col + row * n_cols
}

/// FFT workspace that caches plans and scratch buffers for reuse
pub struct Fft2dWorkspace {
    n_rows: usize,
    n_cols: usize,
    n_total: usize,
    // Forward FFT plans
    fft_row: Arc<dyn Fft<f64>>,
    fft_col: Arc<dyn Fft<f64>>,
    // Inverse FFT plans
    ifft_row: Arc<dyn Fft<f64>>,
    ifft_col: Arc<dyn Fft<f64>>,
    // Scratch buffers
    scratch_row: Vec<Complex64>,
    scratch_col: Vec<Complex64>,
    buffer_col: Vec<Complex64>,
}

impl Fft2dWorkspace {
    /// Create a new FFT workspace for the given dimensions
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        let mut planner = FftPlanner::new();

        let fft_row = planner.plan_fft(n_cols, FftDirection::Forward);
        let fft_col = planner.plan_fft(n_rows, FftDirection::Forward);
        let ifft_row = planner.plan_fft(n_cols, FftDirection::Inverse);
        let ifft_col = planner.plan_fft(n_rows, FftDirection::Inverse);

        let scratch_row = vec![
            Complex64::new(0.0, 0.0);
            fft_row
                .get_inplace_scratch_len()
                .max(ifft_row.get_inplace_scratch_len())
        ];
        let scratch_col = vec![
            Complex64::new(0.0, 0.0);
            fft_col
                .get_inplace_scratch_len()
                .max(ifft_col.get_inplace_scratch_len())
        ];

        Self {
            n_rows,
            n_cols,
            n_total: n_rows * n_cols,
            fft_row,
            fft_col,
            ifft_row,
            ifft_col,
            scratch_row,
            scratch_col,
            buffer_col: vec![Complex64::new(0.0, 0.0); n_rows],
        }
    }

    /// In-place forward 2D FFT
    pub fn fft2d(&mut self, data: &mut [Complex64]) {
        let (n_rows, n_cols) = (self.n_rows, self.n_cols);

        // Transform along each row (contiguous in row-major order)
        for r in 0..n_rows {
            let start = idx2d(r, 0, n_cols);
            self.fft_row
                .process_with_scratch(&mut data[start..start + n_cols], &mut self.scratch_row);
        }

        // Transform along each column (stride n_cols, gather/scatter)
        for c in 0..n_cols {
            for r in 0..n_rows {
                self.buffer_col[r] = data[idx2d(r, c, n_cols)];
            }
            self.fft_col
                .process_with_scratch(&mut self.buffer_col, &mut self.scratch_col);
            for r in 0..n_rows {
                data[idx2d(r, c, n_cols)] = self.buffer_col[r];
            }
        }
    }

    /// In-place inverse 2D FFT (with 1/N normalization)
    pub fn ifft2d(&mut self, data: &mut [Complex64]) {
        let (n_rows, n_cols) = (self.n_rows, self.n_cols);
        let n_total = self.n_total as f64;

        for r in 0..n_rows {
            let start = idx2d(r, 0, n_cols);
            self.ifft_row
                .process_with_scratch(&mut data[start..start + n_cols], &mut self.scratch_row);
        }

        for c in 0..n_cols {
            for r in 0..n_rows {
                self.buffer_col[r] = data[idx2d(r, c, n_cols)];
            }
            self.ifft_col
                .process_with_scratch(&mut self.buffer_col, &mut self.scratch_col);
            for r in 0..n_rows {
                data[idx2d(r, c, n_cols)] = self.buffer_col[r];
            }
        }

        // Normalize by 1/N (numpy convention)
        for val in data.iter_mut() {
            *val /= n_total;
        }
    }
}

/// 2D FFT (in-place, complex-to-complex)
///
/// Transforms row-major data with shape (n_rows, n_cols).
/// Matches numpy.fft.fft2 behavior.
pub fn fft2d(data: &mut [Complex64], n_rows: usize, n_cols: usize) {
    let mut planner = FftPlanner::new();

    let fft_row = planner.plan_fft(n_cols, FftDirection::Forward);
    let mut scratch_row = vec![Complex64::new(0.0, 0.0); fft_row.get_inplace_scratch_len()];
    for r in 0..n_rows {
        let start = idx2d(r, 0, n_cols);
        fft_row.process_with_scratch(&mut data[start..start + n_cols], &mut scratch_row);
    }

    let fft_col = planner.plan_fft(n_rows, FftDirection::Forward);
    let mut scratch_col = vec![Complex64::new(0.0, 0.0); fft_col.get_inplace_scratch_len()];
    let mut buffer_col = vec![Complex64::new(0.0, 0.0); n_rows];
    for c in 0..n_cols {
        for r in 0..n_rows {
            buffer_col[r] = data[idx2d(r, c, n_cols)];
        }
        fft_col.process_with_scratch(&mut buffer_col, &mut scratch_col);
        for r in 0..n_rows {
            data[idx2d(r, c, n_cols)] = buffer_col[r];
        }
    }
}

/// 2D IFFT (in-place, complex-to-complex)
///
/// Transforms row-major data with shape (n_rows, n_cols).
/// Matches numpy.fft.ifft2 behavior (includes 1/N normalization).
pub fn ifft2d(data: &mut [Complex64], n_rows: usize, n_cols: usize) {
    let mut planner = FftPlanner::new();
    let n_total = (n_rows * n_cols) as f64;

    let ifft_row = planner.plan_fft(n_cols, FftDirection::Inverse);
    let mut scratch_row = vec![Complex64::new(0.0, 0.0); ifft_row.get_inplace_scratch_len()];
    for r in 0..n_rows {
        let start = idx2d(r, 0, n_cols);
        ifft_row.process_with_scratch(&mut data[start..start + n_cols], &mut scratch_row);
    }

    let ifft_col = planner.plan_fft(n_rows, FftDirection::Inverse);
    let mut scratch_col = vec![Complex64::new(0.0, 0.0); ifft_col.get_inplace_scratch_len()];
    let mut buffer_col = vec![Complex64::new(0.0, 0.0); n_rows];
    for c in 0..n_cols {
        for r in 0..n_rows {
            buffer_col[r] = data[idx2d(r, c, n_cols)];
        }
        ifft_col.process_with_scratch(&mut buffer_col, &mut scratch_col);
        for r in 0..n_rows {
            data[idx2d(r, c, n_cols)] = buffer_col[r];
        }
    }

    for val in data.iter_mut() {
        *val /= n_total;
    }
}

/// 2D FFT shift: swap quadrants so zero-frequency is at center
///
/// Returns a new array with the zero-frequency component shifted to the
/// center. Matches numpy.fft.fftshift for 2D row-major data.
pub fn fftshift(data: &[Complex64], n_rows: usize, n_cols: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); n_rows * n_cols];

    let hr = n_rows / 2;
    let hc = n_cols / 2;

    for r in 0..n_rows {
        for c in 0..n_cols {
            let sr = (r + hr) % n_rows;
            let sc = (c + hc) % n_cols;
            out[idx2d(sr, sc, n_cols)] = data[idx2d(r, c, n_cols)];
        }
    }

    out
}

/// 2D inverse FFT shift: undo fftshift
///
/// Returns a new array with the zero-frequency component shifted back to the
/// corner. Matches numpy.fft.ifftshift for 2D row-major data. For even
/// dimensions this coincides with `fftshift`.
pub fn ifftshift(data: &[Complex64], n_rows: usize, n_cols: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); n_rows * n_cols];

    let hr = (n_rows + 1) / 2;
    let hc = (n_cols + 1) / 2;

    for r in 0..n_rows {
        for c in 0..n_cols {
            let sr = (r + hr) % n_rows;
            let sc = (c + hc) % n_cols;
            out[idx2d(sr, sc, n_cols)] = data[idx2d(r, c, n_cols)];
        }
    }

    out
}
