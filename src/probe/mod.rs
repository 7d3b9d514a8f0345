//! Probe strategies and their shared contract.
//!
//! Three structurally different checks share one shape: given a parsed
//! target and a timeout, produce a [`ProbeOutcome`] that is either a
//! latency measurement or a descriptive error, never both and never
//! neither. The [`Prober`] variant is selected once per run and dispatches
//! every call for that run; the `Request` variant owns the shared HTTP
//! client reused across all cycles.

pub mod http;
pub mod icmp;
pub mod tcp;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::target::{self, TargetDescriptor};

/// User agent sent with every request-mode probe.
pub const USER_AGENT: &str = concat!("hostpulse/", env!("CARGO_PKG_VERSION"));

/// Probe strategy for a run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Network-layer ICMP echo request/reply.
    #[value(alias = "icmp")]
    Echo,
    /// Transport-layer TCP connection establishment.
    #[value(alias = "tcp")]
    Connect,
    /// Application-layer HTTP GET with full body drain.
    #[value(alias = "http")]
    Request,
}

impl Mode {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Connect => "connect",
            Self::Request => "request",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conclusive result of one probe invocation for one target.
///
/// Exactly one of latency and error is present, enforced by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// Target responded; round-trip latency in milliseconds.
    Up { latency_ms: f64 },
    /// Target failed the check; descriptive error message.
    Down { error: String },
}

impl ProbeOutcome {
    /// Successful outcome with the measured latency.
    pub fn up(latency_ms: f64) -> Self {
        Self::Up { latency_ms }
    }

    /// Failed outcome with a descriptive error.
    pub fn down(error: impl Into<String>) -> Self {
        Self::Down {
            error: error.into(),
        }
    }

    /// Whether the target passed the check.
    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up { .. })
    }

    /// Measured latency in milliseconds, if the target was up.
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Up { latency_ms } => Some(*latency_ms),
            Self::Down { .. } => None,
        }
    }

    /// Error message, if the target was down.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Up { .. } => None,
            Self::Down { error } => Some(error),
        }
    }
}

/// Errors building a prober at run start.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The run's selected probe strategy.
///
/// Built once before the first cycle; the `Request` variant holds the
/// shared [`reqwest::Client`] (fixed headers, identifying user agent)
/// reused by every request-mode call in the run and released when the
/// prober is dropped.
#[derive(Debug)]
pub enum Prober {
    Echo,
    Connect,
    Request { client: reqwest::Client },
}

impl Prober {
    /// Build the prober for the given mode, acquiring the shared HTTP
    /// client for request mode.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the HTTP client cannot be built; this
    /// is the run's only fatal resource-acquisition error.
    pub fn new(mode: Mode) -> Result<Self, SessionError> {
        match mode {
            Mode::Echo => Ok(Self::Echo),
            Mode::Connect => Ok(Self::Connect),
            Mode::Request => {
                let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
                tracing::debug!(user_agent = USER_AGENT, "HTTP session acquired");
                Ok(Self::Request { client })
            }
        }
    }

    /// The mode this prober was built for.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Echo => Mode::Echo,
            Self::Connect => Mode::Connect,
            Self::Request { .. } => Mode::Request,
        }
    }

    /// Parse a raw target for this prober's mode and run one check
    /// against it.
    ///
    /// Parse failures are returned as a `Down` outcome labelled with the
    /// trimmed raw string; probe failures are returned as a `Down`
    /// outcome with the failure's message. This call never fails.
    pub async fn probe(&self, raw_target: &str, timeout: Duration) -> (String, ProbeOutcome) {
        let descriptor = match target::parse(raw_target, self.mode()) {
            Ok(descriptor) => descriptor,
            Err(e) => return (raw_target.trim().to_string(), ProbeOutcome::down(e.to_string())),
        };

        let label = descriptor.label();
        let outcome = match (self, &descriptor) {
            (Self::Echo, TargetDescriptor::Host(host)) => icmp::probe(host, timeout).await,
            (Self::Connect, TargetDescriptor::HostPort { host, port }) => {
                tcp::probe(host, *port, timeout).await
            }
            (Self::Request { client }, TargetDescriptor::Url(url)) => {
                http::probe(client, url, timeout).await
            }
            // parse() always returns the descriptor shape matching the
            // mode it was given; this arm is unreachable in practice but
            // is still reported as data rather than a panic.
            _ => ProbeOutcome::down("internal: descriptor does not match probe mode"),
        };

        (label, outcome)
    }
}

impl Drop for Prober {
    fn drop(&mut self) {
        if let Self::Request { .. } = self {
            tracing::debug!("HTTP session released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::Echo.as_str(), "echo");
        assert_eq!(Mode::Connect.as_str(), "connect");
        assert_eq!(Mode::Request.as_str(), "request");
    }

    #[test]
    fn test_outcome_invariant() {
        let up = ProbeOutcome::up(12.5);
        assert!(up.is_up());
        assert_eq!(up.latency_ms(), Some(12.5));
        assert_eq!(up.error(), None);

        let down = ProbeOutcome::down("timeout");
        assert!(!down.is_up());
        assert_eq!(down.latency_ms(), None);
        assert_eq!(down.error(), Some("timeout"));
    }

    #[test]
    fn test_prober_mode_roundtrip() {
        assert_eq!(Prober::new(Mode::Echo).unwrap().mode(), Mode::Echo);
        assert_eq!(Prober::new(Mode::Connect).unwrap().mode(), Mode::Connect);
        assert_eq!(Prober::new(Mode::Request).unwrap().mode(), Mode::Request);
    }

    #[tokio::test]
    async fn test_probe_parse_error_is_down() {
        let prober = Prober::new(Mode::Connect).unwrap();
        let (label, outcome) = prober
            .probe("example.com", Duration::from_secs(1))
            .await;
        assert_eq!(label, "example.com");
        assert!(!outcome.is_up());
        assert!(outcome.error().unwrap().contains("port"));
    }
}
