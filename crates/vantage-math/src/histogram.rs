//! Equal-width histogram binning.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// A single histogram bin covering `[lower, upper)`.
///
/// The last bin of a histogram is closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge.
    pub upper: f64,
    /// Number of observations in the bin.
    pub count: usize,
}

impl Bin {
    /// Midpoint of the bin.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Returns true if `x` lies in `[lower, upper)`.
    ///
    /// A zero-width bin contains its single edge. The closed upper edge of a
    /// histogram's last bin is handled by [`Histogram::bin_index`].
    pub fn contains(&self, x: f64) -> bool {
        if self.lower == self.upper {
            x == self.lower
        } else {
            x >= self.lower && x < self.upper
        }
    }
}

/// Equal-width histogram of a sample.
///
/// When every observation is identical the range is degenerate and the
/// histogram holds a single zero-width bin containing the whole sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width buckets spanning `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bins` is zero, the sample is empty, or the
    /// sample contains non-finite values.
    pub fn new(values: &[f64], bins: usize) -> MathResult<Self> {
        if bins == 0 {
            return Err(MathError::invalid_input("bin count must be positive"));
        }
        if values.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("histogram values must be finite"));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Ok(Self {
                bins: vec![Bin {
                    lower: min,
                    upper: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values {
            counts[slot(v, min, width, bins)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count,
            })
            .collect();

        Ok(Self { bins })
    }

    /// The bins in ascending order.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false; a histogram holds at least one bin.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total number of binned observations.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Index of the bin containing `x`, if `x` is inside the histogram range.
    ///
    /// Interior edges belong to the upper bin, matching how observations
    /// are counted.
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        if !(x >= first.lower && x <= last.upper) {
            return None;
        }
        if self.bins.len() == 1 {
            return Some(0);
        }
        let width = (last.upper - first.lower) / self.bins.len() as f64;
        Some(slot(x, first.lower, width, self.bins.len()))
    }
}

fn slot(x: f64, min: f64, width: f64, bins: usize) -> usize {
    (((x - min) / width).floor() as usize).min(bins - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values: Vec<f64> = (0..97).map(|i| (i as f64 * 0.37).sin() * 0.02).collect();
        let hist = Histogram::new(&values, 10).unwrap();
        assert_eq!(hist.len(), 10);
        assert_eq!(hist.total(), 97);
    }

    #[test]
    fn test_edges() {
        let hist = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        let bins = hist.bins();
        assert_relative_eq!(bins[0].lower, 0.0);
        assert_relative_eq!(bins[3].upper, 4.0);
        // max lands in the last bin
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_degenerate_range() {
        let hist = Histogram::new(&[0.0; 6], 50).unwrap();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.bin_index(0.0), Some(0));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(Histogram::new(&[1.0], 0).is_err());
        assert!(Histogram::new(&[], 10).is_err());
        assert!(Histogram::new(&[1.0, f64::NAN], 10).is_err());
    }

    #[test]
    fn test_bin_index() {
        let hist = Histogram::new(&[-1.0, 1.0], 2).unwrap();
        assert_eq!(hist.bin_index(-0.5), Some(0));
        assert_eq!(hist.bin_index(1.0), Some(1));
        assert_eq!(hist.bin_index(2.0), None);
    }

    #[test]
    fn test_interior_edge_matches_counts() {
        // 1.0 sits on the edge between bins 0 and 1 and is counted in bin 1
        let hist = Histogram::new(&[0.0, 1.0, 2.0], 2).unwrap();
        assert_eq!(hist.bins()[0].count, 1);
        assert_eq!(hist.bins()[1].count, 2);
        assert_eq!(hist.bin_index(1.0), Some(1));
        assert!(!hist.bins()[0].contains(1.0));
        assert!(hist.bins()[1].contains(1.0));
        assert_eq!(hist.bin_index(2.0), Some(1));
        assert_eq!(hist.bin_index(0.0), Some(0));
    }
}
