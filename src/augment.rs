//! Geometric image augmentation
//!
//! Random rotation and horizontal flipping of the source image before it is
//! pushed through the corruption pipeline. Rotation resamples with bilinear
//! interpolation about the image center, keeping the pixel grid size exactly;
//! real and imaginary parts are interpolated independently (with a linear
//! kernel the two are equivalent to interpolating the complex values).

use crate::fft::idx2d;
use num_complex::Complex64;
use rand::Rng;

/// Rotate a complex image by `angle_deg` degrees about its center.
///
/// Output shape equals input shape; regions rotated in from outside the
/// source grid are filled with zero. Positive angles rotate the row axis
/// toward the column axis.
pub fn rotate(img: &[Complex64], n_rows: usize, n_cols: usize, angle_deg: f64) -> Vec<Complex64> {
    let theta = angle_deg.to_radians();
    let (sin_t, cos_t) = theta.sin_cos();

    let cr = (n_rows as f64 - 1.0) / 2.0;
    let cc = (n_cols as f64 - 1.0) / 2.0;

    let mut out = vec![Complex64::new(0.0, 0.0); n_rows * n_cols];

    for r in 0..n_rows {
        for c in 0..n_cols {
            let dr = r as f64 - cr;
            let dc = c as f64 - cc;

            // Inverse mapping: source coordinate that lands on (r, c)
            let sr = cos_t * dr + sin_t * dc + cr;
            let sc = -sin_t * dr + cos_t * dc + cc;

            out[idx2d(r, c, n_cols)] = bilinear(img, n_rows, n_cols, sr, sc);
        }
    }

    out
}

/// Bilinear sample at fractional coordinate (sr, sc), zero outside the grid
fn bilinear(img: &[Complex64], n_rows: usize, n_cols: usize, sr: f64, sc: f64) -> Complex64 {
    let r0 = sr.floor();
    let c0 = sc.floor();
    let fr = sr - r0;
    let fc = sc - c0;

    let mut acc = Complex64::new(0.0, 0.0);
    for (dr, wr) in [(0.0, 1.0 - fr), (1.0, fr)] {
        for (dc, wc) in [(0.0, 1.0 - fc), (1.0, fc)] {
            let w = wr * wc;
            if w == 0.0 {
                continue;
            }
            let rr = r0 + dr;
            let cc = c0 + dc;
            if rr >= 0.0 && cc >= 0.0 && (rr as usize) < n_rows && (cc as usize) < n_cols {
                acc += img[idx2d(rr as usize, cc as usize, n_cols)] * w;
            }
        }
    }
    acc
}

/// Mirror the image along the column axis (horizontal flip), in place
pub fn flip_horizontal(img: &mut [Complex64], n_rows: usize, n_cols: usize) {
    for r in 0..n_rows {
        let row = &mut img[idx2d(r, 0, n_cols)..idx2d(r, 0, n_cols) + n_cols];
        row.reverse();
    }
}

/// Apply the configured augmentations: rotation (angle drawn uniformly from
/// `[-max_deg, +max_deg]`) followed by a probability-gated horizontal flip.
///
/// A `max_deg` of 0 skips rotation entirely and a `flip_probability` of 0
/// skips flipping, leaving the image untouched by that stage.
pub fn augment<R: Rng + ?Sized>(
    rng: &mut R,
    mut img: Vec<Complex64>,
    n_rows: usize,
    n_cols: usize,
    max_deg: f64,
    flip_probability: f64,
) -> Vec<Complex64> {
    if max_deg > 0.0 {
        let angle = (rng.gen::<f64>() - 0.5) * 2.0 * max_deg;
        img = rotate(&img, n_rows, n_cols, angle);
    }

    if flip_probability > 0.0 && rng.gen::<f64>() < flip_probability {
        flip_horizontal(&mut img, n_rows, n_cols);
    }

    img
}
