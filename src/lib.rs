//! hostpulse - Periodic Connectivity Prober
//!
//! Repeatedly measures reachability and round-trip latency for a set of
//! targets using one of three probe strategies:
//!
//! - **Echo** (`probe::icmp`): network-layer ICMP echo request/reply
//! - **Connect** (`probe::tcp`): transport-layer connection establishment
//! - **Request** (`probe::http`): application-layer HTTP GET with full
//!   body drain
//!
//! One strategy is selected for the whole run; the [`monitor::Monitor`]
//! loop walks the configured targets in order each cycle, emits one
//! [`monitor::TargetReport`] per target, then sleeps for the configured
//! delay. Probe and parse failures are data, not errors: they become
//! `DOWN` reports and the loop continues.
//!
//! # Example
//!
//! ```rust,no_run
//! use hostpulse::{Mode, Monitor, MonitorConfig};
//! use hostpulse::output::ConsoleSink;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::new(Mode::Echo, vec!["8.8.8.8".into(), "1.1.1.1".into()]);
//!     let monitor = Monitor::new(config)?;
//!     let mut sink = ConsoleSink::new();
//!     monitor.run(&mut sink).await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod monitor;
pub mod output;
pub mod probe;
pub mod target;

pub use config::{ConfigError, MonitorConfig};
pub use monitor::{Monitor, MonitorError, ReportSink, TargetReport};
pub use probe::{Mode, ProbeOutcome, Prober};
pub use target::{TargetDescriptor, TargetError};
