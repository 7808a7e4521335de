// dqm-core/src/domain/quality/stats.rs

/// `count / total * 100`. Callers guarantee `total > 0`.
pub fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

/// Linear score decay: `max(0, 100 - weight * pct)`.
pub fn decayed_score(pct: f64, weight: f64) -> f64 {
    (100.0 - weight * pct).max(0.0)
}

/// Quantile by linear interpolation between closest ranks
/// (position `(n - 1) * q` over the sorted sample). `None` on an empty sample.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            q1: quantile(&sorted, 0.25)?,
            q3: quantile(&sorted, 0.75)?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Tukey fences: `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`.
    pub fn fences(&self) -> (f64, f64) {
        (self.q1 - 1.5 * self.iqr(), self.q3 + 1.5 * self.iqr())
    }
}
