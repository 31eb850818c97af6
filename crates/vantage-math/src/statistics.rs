//! Descriptive statistics over return samples.
//!
//! All functions take plain `f64` slices. Sample moments use the
//! unbiased `N - 1` denominator; percentiles use linear interpolation
//! between adjacent order statistics.

use crate::error::{MathError, MathResult};

/// Arithmetic mean of a sample.
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] for an empty sample.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (`N - 1` denominator).
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] if fewer than 2 values are given.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let mu = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    Ok(ss / (values.len() - 1) as f64)
}

/// Sample standard deviation (`N - 1` denominator).
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] if fewer than 2 values are given.
pub fn sample_std(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Unbiased sample covariance of two equally long samples.
///
/// # Errors
///
/// Returns an error if the lengths differ or fewer than 2 pairs are given.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> MathResult<f64> {
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "samples must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(MathError::insufficient_data(2, xs.len()));
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let sp: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    Ok(sp / (xs.len() - 1) as f64)
}

/// Returns an ascending copy of the sample.
///
/// NaN values sort last.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Percentile of an ascending-sorted sample, `q` in `[0, 1]`.
///
/// Uses the linear method: position `q * (n - 1)` is interpolated between
/// the two neighbouring order statistics.
///
/// # Errors
///
/// Returns an error for an empty sample or `q` outside `[0, 1]`.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "quantile must be within [0, 1], got {q}"
        )));
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Ok(sorted[lower]);
    }

    let frac = pos - lower as f64;
    Ok(sorted[lower] + frac * (sorted[upper] - sorted[lower]))
}

/// Percentile of an unsorted sample, `q` in `[0, 1]`.
///
/// # Errors
///
/// See [`percentile_sorted`].
pub fn percentile(values: &[f64], q: f64) -> MathResult<f64> {
    percentile_sorted(&sorted(values), q)
}
