use crate::AutomationStatus;

/// Shown when the status payload has no human-readable next run.
pub const DEFAULT_NEXT_RUN: &str = "9:00 AM UTC";

/// Automation status panel pinned to the front of the results region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPanel {
    pub schedule: String,
    pub next_run: String,
    pub total_runs: u64,
    pub success_rate: u8,
}

impl StatusPanel {
    pub fn from_status(status: &AutomationStatus) -> Self {
        let stats = status.statistics;
        Self {
            schedule: status.schedule.human_readable.clone(),
            next_run: next_run_label(status),
            total_runs: stats.total_executions,
            success_rate: success_rate(stats.successful, stats.total_executions),
        }
    }
}

pub(crate) fn next_run_label(status: &AutomationStatus) -> String {
    let words = status.schedule.in_words.trim();
    if words.is_empty() {
        DEFAULT_NEXT_RUN.to_string()
    } else {
        words.to_string()
    }
}

/// Percentage of successful runs, rounded half up. Zero runs yields 0, and a
/// `successful` count above `total` is clamped to 100.
pub fn success_rate(successful: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let successful = u128::from(successful.min(total));
    let total = u128::from(total);
    ((successful * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecutionStats, Schedule};

    #[test]
    fn success_rate_examples() {
        assert_eq!(success_rate(0, 0), 0);
        assert_eq!(success_rate(7, 10), 70);
        assert_eq!(success_rate(3, 3), 100);
    }

    #[test]
    fn success_rate_rounds_half_up() {
        assert_eq!(success_rate(1, 3), 33);
        assert_eq!(success_rate(2, 3), 67);
        assert_eq!(success_rate(1, 8), 13);
    }

    #[test]
    fn success_rate_clamps_inconsistent_counts() {
        assert_eq!(success_rate(12, 10), 100);
        assert_eq!(success_rate(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn panel_falls_back_to_default_next_run() {
        let panel = StatusPanel::from_status(&AutomationStatus {
            schedule: Schedule::default(),
            statistics: ExecutionStats {
                total_executions: 0,
                successful: 0,
            },
        });
        assert_eq!(panel.next_run, DEFAULT_NEXT_RUN);
        assert_eq!(panel.success_rate, 0);
    }
}
