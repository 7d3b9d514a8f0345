//! Echo probe: ICMP echo request/reply.
//!
//! Measures network-layer round-trip time to a host. Raw-socket
//! permission failures are reported as ordinary outcome errors, not
//! distinguished specially.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError, ICMP};
use tokio::time::timeout;

use super::ProbeOutcome;

/// Error string reported when no reply arrives within the timeout.
const TIMEOUT_ERROR: &str = "timeout";

/// Resolve hostname to IP address.
async fn resolve_host(host: &str) -> Result<IpAddr, std::io::Error> {
    // IP literals skip the DNS lookup entirely.
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs = tokio::net::lookup_host(format!("{host}:0")).await?;
    addrs
        .into_iter()
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"))
}

/// Send one ICMP echo request to `host` and wait up to `timeout` for the
/// reply.
///
/// A reply within the timeout yields `Up` with the round-trip time in
/// milliseconds (sub-millisecond precision preserved); expiry yields
/// `Down` with the error `"timeout"`; every other failure (resolution,
/// client creation, permission, malformed reply) yields `Down` with the
/// failure's message. Never returns an error past this boundary.
pub async fn probe(host: &str, probe_timeout: Duration) -> ProbeOutcome {
    let ip_addr = match resolve_host(host).await {
        Ok(ip) => ip,
        Err(e) => {
            tracing::warn!(host = %host, error = %e, "Echo probe failed to resolve host");
            return ProbeOutcome::down(e.to_string());
        }
    };

    let client = match ip_addr {
        IpAddr::V4(_) => Client::new(&Config::default()),
        IpAddr::V6(_) => Client::new(&Config::builder().kind(ICMP::V6).build()),
    };

    let client = match client {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(host = %host, error = %e, "Echo probe failed to create ICMP client");
            return ProbeOutcome::down(e.to_string());
        }
    };

    let mut pinger = client.pinger(ip_addr, PingIdentifier(rand::random())).await;
    pinger.timeout(probe_timeout);

    // The pinger enforces its own timeout; the outer timer is the hard
    // bound in case the reply task stalls.
    match timeout(probe_timeout, pinger.ping(PingSequence(0), &[])).await {
        Ok(Ok((_, rtt))) => {
            let latency_ms = rtt.as_secs_f64() * 1000.0;
            tracing::debug!(host = %host, latency_ms, "Echo probe successful");
            ProbeOutcome::up(latency_ms)
        }
        Ok(Err(SurgeError::Timeout { .. })) | Err(_) => {
            tracing::warn!(host = %host, timeout_ms = probe_timeout.as_millis(), "Echo probe timed out");
            ProbeOutcome::down(TIMEOUT_ERROR)
        }
        Ok(Err(e)) => {
            tracing::warn!(host = %host, error = %e, "Echo probe failed");
            ProbeOutcome::down(e.to_string())
        }
    }
}
