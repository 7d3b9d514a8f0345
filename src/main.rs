//! hostpulse binary entry point.
//!
//! Parses the CLI surface, builds a validated [`MonitorConfig`], and runs
//! the monitor until interrupted. Core functionality lives in the
//! `hostpulse` library crate.

use std::time::Duration;

use clap::Parser;
use hostpulse::config::split_target_list;
use hostpulse::output::ConsoleSink;
use hostpulse::{Mode, Monitor, MonitorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// hostpulse - periodic connectivity and latency prober
#[derive(Parser, Debug)]
#[command(name = "hostpulse", version, about, long_about = None)]
struct Cli {
    /// Probe strategy for the whole run
    #[arg(long, value_enum, default_value_t = Mode::Echo, env = "HOSTPULSE_MODE")]
    mode: Mode,

    /// Comma-separated targets (host, host:port, or URL)
    #[arg(long, required = true, env = "HOSTPULSE_TARGETS")]
    targets: String,

    /// Timeout in seconds for each probe
    #[arg(long, default_value = "3", value_parser = positive_seconds)]
    timeout: Duration,

    /// Delay in seconds between cycles
    #[arg(long, default_value = "1", value_parser = nonnegative_seconds)]
    delay: Duration,
}

fn parse_seconds(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|e| format!("not a number of seconds: {e}"))
        .and_then(|v| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err("not a finite number of seconds".to_string())
            }
        })
}

fn positive_seconds(s: &str) -> Result<Duration, String> {
    let secs = parse_seconds(s)?;
    if secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err("must be positive".to_string())
    }
}

fn nonnegative_seconds(s: &str) -> Result<Duration, String> {
    let secs = parse_seconds(s)?;
    if secs >= 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err("must not be negative".to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = MonitorConfig::new(cli.mode, split_target_list(&cli.targets))
        .with_timeout(cli.timeout)
        .with_delay(cli.delay);

    // Fatal configuration and session-acquisition errors surface here,
    // before any cycle starts.
    let monitor = Monitor::new(config)?;
    let mut sink = ConsoleSink::new();

    tokio::select! {
        _ = monitor.run(&mut sink) => {}
        _ = shutdown_signal() => {
            tracing::info!("Interrupt received, shutting down");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
