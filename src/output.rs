//! Console rendering of probe reports.

use crate::monitor::{ReportSink, TargetReport};

/// Width of the cycle separator line.
const SEPARATOR_WIDTH: usize = 60;

/// Placeholder shown when no latency was measured.
const LATENCY_PLACEHOLDER: &str = "\u{2014}";

/// Format a latency for display: one decimal place with a `ms` suffix,
/// or the placeholder when absent.
pub fn format_latency(latency_ms: Option<f64>) -> String {
    match latency_ms {
        Some(ms) => format!("{ms:.1} ms"),
        None => LATENCY_PLACEHOLDER.to_string(),
    }
}

/// Render one report as a fixed-width console row.
pub fn format_report(report: &TargetReport) -> String {
    let status = if report.outcome.is_up() { "UP" } else { "DOWN" };
    let line = format!(
        "{:<30} {:<7} {:<5} {:>10} {}",
        report.label,
        report.mode.as_str().to_uppercase(),
        status,
        format_latency(report.outcome.latency_ms()),
        report.outcome.error().unwrap_or(""),
    );
    line.trim_end().to_string()
}

/// Sink that prints one row per report to stdout and a separator line
/// after each cycle.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleSink {
    fn report(&mut self, report: &TargetReport) {
        println!("{}", format_report(report));
    }

    fn cycle_complete(&mut self) {
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{Mode, ProbeOutcome};

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(Some(12.34)), "12.3 ms");
        assert_eq!(format_latency(Some(0.05)), "0.1 ms");
        assert_eq!(format_latency(None), "\u{2014}");
    }

    #[test]
    fn test_format_report_up() {
        let report = TargetReport {
            label: "8.8.8.8".to_string(),
            mode: Mode::Echo,
            outcome: ProbeOutcome::up(11.96),
        };
        let line = format_report(&report);
        assert!(line.starts_with("8.8.8.8"));
        assert!(line.contains("ECHO"));
        assert!(line.contains("UP"));
        assert!(line.contains("12.0 ms"));
    }

    #[test]
    fn test_format_report_down_carries_error() {
        let report = TargetReport {
            label: "example.com:81".to_string(),
            mode: Mode::Connect,
            outcome: ProbeOutcome::down("timeout"),
        };
        let line = format_report(&report);
        assert!(line.contains("CONNECT"));
        assert!(line.contains("DOWN"));
        assert!(line.contains('\u{2014}'));
        assert!(line.ends_with("timeout"));
    }
}
