//! Connect probe: TCP connection establishment timing.
//!
//! Measures the time to complete a TCP handshake, excluding any
//! subsequent I/O. The configured timeout is a hard bound on the connect
//! attempt, independent of platform connect defaults.

use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::ProbeOutcome;

/// Error string reported when the connect attempt exceeds the timeout.
const TIMEOUT_ERROR: &str = "timeout";

/// Attempt to establish a TCP connection to `host:port` within
/// `timeout`.
///
/// Timing starts immediately before the attempt and stops once the
/// handshake completes. On success the connection is shut down
/// best-effort; a failed close never alters the already-successful
/// outcome. Refusal, expiry, resolution and routing failures all yield
/// `Down` with a descriptive message.
pub async fn probe(host: &str, port: u16, probe_timeout: Duration) -> ProbeOutcome {
    let target = format!("{host}:{port}");

    let start = Instant::now();
    match timeout(probe_timeout, TcpStream::connect(&target)).await {
        Ok(Ok(mut stream)) => {
            let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            // Orderly close, errors ignored.
            let _ = stream.shutdown().await;
            tracing::debug!(target = %target, latency_ms, "Connect probe successful");
            ProbeOutcome::up(latency_ms)
        }
        Ok(Err(e)) => {
            tracing::warn!(target = %target, error = %e, "Connect probe failed");
            ProbeOutcome::down(e.to_string())
        }
        Err(_) => {
            tracing::warn!(target = %target, timeout_ms = probe_timeout.as_millis(), "Connect probe timed out");
            ProbeOutcome::down(TIMEOUT_ERROR)
        }
    }
}
