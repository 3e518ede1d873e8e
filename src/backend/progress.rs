//! Upload progress tracking.

/// Follows percentage updates from a long-running upload and says when the
/// grid should refetch its rows.
///
/// Fires once per run to 100%; any later update below 100 starts a new run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressTracker {
    percent: u8,
    completed: bool,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported percentage (0..=100).
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Record an update. Returns `true` exactly when this update completes
    /// the current run.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn record(&mut self, percent: f64) -> bool {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0).floor() as u8
        } else {
            0
        };
        self.percent = percent;
        if percent < 100 {
            self.completed = false;
            return false;
        }
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_run() {
        let mut tracker = ProgressTracker::new();
        assert!(!tracker.record(10.0));
        assert!(!tracker.record(99.9));
        assert!(tracker.record(100.0));
        assert!(!tracker.record(100.0));
        assert!(!tracker.record(250.0));
        assert!(!tracker.record(5.0));
        assert!(tracker.record(100.0));
    }

    #[test]
    fn clamps_garbage() {
        let mut tracker = ProgressTracker::new();
        assert!(!tracker.record(f64::NAN));
        assert_eq!(tracker.percent(), 0);
        assert!(!tracker.record(-4.0));
        assert_eq!(tracker.percent(), 0);
    }
}
