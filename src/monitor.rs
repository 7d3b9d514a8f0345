//! The probe scheduler.
//!
//! [`Monitor`] drives the run: each cycle walks the configured targets in
//! order, dispatches every one to the run's probe strategy, emits one
//! report per target immediately, marks the cycle complete, then sleeps
//! for the configured delay. The loop is infinite by design (a monitor,
//! not a batch job); it terminates only when its future is cancelled from
//! outside, at which point the prober and its session are released by
//! drop.
//!
//! # Error Handling Philosophy
//!
//! Per-target failures - parse errors, timeouts, refusals, bad statuses -
//! are valid observations and become that target's `DOWN` report; the
//! cycle always proceeds to the next target. Only two failures are fatal,
//! and both happen in [`Monitor::new`] before the first cycle: an empty
//! target list and a failure to acquire the shared HTTP session.

use thiserror::Error;
use tokio::time::sleep;

use crate::config::{ConfigError, MonitorConfig};
use crate::probe::{Mode, ProbeOutcome, Prober, SessionError};

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to acquire the shared probe session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One probe result for one target in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetReport {
    /// Target as originally addressed (host, host:port, or URL).
    pub label: String,
    /// The run's probe mode.
    pub mode: Mode,
    /// The conclusive outcome.
    pub outcome: ProbeOutcome,
}

/// Consumer of the scheduler's output stream.
///
/// Reports arrive one at a time, in target order, as soon as each probe
/// concludes; `cycle_complete` follows the last report of every cycle.
pub trait ReportSink {
    /// Consume one target's report.
    fn report(&mut self, report: &TargetReport);

    /// Mark the end of a cycle.
    fn cycle_complete(&mut self);
}

/// The scheduling loop for one monitoring run.
pub struct Monitor {
    config: MonitorConfig,
    prober: Prober,
}

impl Monitor {
    /// Validate the configuration and acquire the run's probe strategy
    /// (including the shared HTTP session in request mode).
    ///
    /// # Errors
    /// Returns [`MonitorError::Config`] for an empty target list or
    /// non-positive timeout, [`MonitorError::Session`] if the HTTP client
    /// cannot be built. These are the run's only fatal errors.
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        let prober = Prober::new(config.mode)?;

        tracing::info!(
            mode = %config.mode,
            targets = config.targets.len(),
            timeout_ms = config.timeout.as_millis(),
            delay_ms = config.delay.as_millis(),
            "Monitor ready"
        );

        Ok(Self { config, prober })
    }

    /// The validated configuration for this run.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one cycle: probe every target in order, emitting each report
    /// immediately, then mark the cycle complete.
    ///
    /// Every configured target yields exactly one report, even under
    /// total failure; nothing is skipped and nothing aborts the cycle.
    pub async fn run_cycle<S: ReportSink>(&self, sink: &mut S) {
        for raw_target in &self.config.targets {
            let (label, outcome) = self.prober.probe(raw_target, self.config.timeout).await;
            sink.report(&TargetReport {
                label,
                mode: self.config.mode,
                outcome,
            });
        }
        sink.cycle_complete();
    }

    /// Run cycles forever, sleeping for the configured delay between
    /// them.
    ///
    /// Never returns; terminate it by cancelling the future (dropping it
    /// or racing it in a `select!`). Cancellation mid-probe, mid-sleep or
    /// mid-emission is safe, and dropping the monitor afterwards releases
    /// the shared session.
    pub async fn run<S: ReportSink>(&self, sink: &mut S) {
        loop {
            self.run_cycle(sink).await;
            sleep(self.config.delay).await;
        }
    }
}
