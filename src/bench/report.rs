use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// Aggregate outcome of one benchmark run.
///
/// Individual request failures are only visible here as counts; per-request
/// detail goes to the diagnostic trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    total: usize,
    succeeded: usize,
    failed: usize,
    elapsed: Duration,
}

impl RunSummary {
    pub(crate) fn new(total: usize, succeeded: usize, failed: usize, elapsed: Duration) -> Self {
        Self {
            total,
            succeeded,
            failed,
            elapsed,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn avg_per_request(&self) -> Duration {
        if self.total == 0 {
            Duration::ZERO
        } else {
            self.elapsed / self.total as u32
        }
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total requests:      {}", self.total)?;
        writeln!(f, "Successful:          {}", self.succeeded)?;
        writeln!(f, "Failures:            {}", self.failed)?;
        writeln!(f, "Time taken:          {:?}", self.elapsed)?;
        write!(f, "Average per request: {:?}", self.avg_per_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average() {
        let summary = RunSummary::new(10, 10, 0, Duration::from_millis(100));
        assert_eq!(summary.avg_per_request(), Duration::from_millis(10));
        assert_eq!(
            RunSummary::new(0, 0, 0, Duration::ZERO).avg_per_request(),
            Duration::ZERO
        );
    }

    #[test]
    fn display_includes_counts() {
        let text = RunSummary::new(5, 4, 1, Duration::from_millis(50)).to_string();
        assert!(text.contains("Total requests:      5"));
        assert!(text.contains("Failures:            1"));
    }
}
