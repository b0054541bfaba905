// src/core/stats.rs
//
// Welford accumulator: one pass per group, numerically stable, sample std.

/// Running mean / squared-deviation accumulator.
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

/// Frozen statistics for a group that cleared the validity threshold:
/// at least two values and a strictly positive standard deviation.
#[derive(Clone, Copy, Debug)]
pub struct GroupStats {
    pub mean: f64,
    pub std: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self { n_vals: 0, mean: 0.0, diff_2_sum: 0.0 }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn count(&self) -> usize {
        self.n_vals
    }

    /// Sample standard deviation (n−1). None with fewer than two values.
    pub fn sample_std(&self) -> Option<f64> {
        if self.n_vals < 2 {
            return None;
        }
        Some((self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt())
    }

    /// Freeze into group statistics, or None when the group is degenerate
    /// (<2 values, zero spread, or a non-finite accumulation).
    pub fn finish(&self) -> Option<GroupStats> {
        let std = self.sample_std()?;
        if !(std > 0.0) || !std.is_finite() || !self.mean.is_finite() {
            return None;
        }
        Some(GroupStats { mean: self.mean, std })
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
