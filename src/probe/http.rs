//! Request probe: HTTP GET timing with full body drain.
//!
//! Measures end-to-end latency from request start to the moment the
//! complete response body has been read, so transfer time counts, not
//! just time-to-headers. All calls share the run's single client.

use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::time::timeout;

use super::ProbeOutcome;

/// Error string reported when the request exceeds the timeout.
const TIMEOUT_ERROR: &str = "timeout";

/// Issue a GET to `url` through the shared client, draining the body,
/// bounded by `timeout`.
///
/// A status in [200, 400) yields `Up` with the elapsed milliseconds; any
/// other status yields `Down` naming the code (`HTTP 404`); transport
/// failures (DNS, TLS, refusal, expiry) yield `Down` with the failure's
/// message.
pub async fn probe(client: &Client, url: &str, probe_timeout: Duration) -> ProbeOutcome {
    let start = Instant::now();

    let result = timeout(probe_timeout, async {
        let response = client.get(url).send().await?;
        let status = response.status();
        // Drain the body so the measurement covers the full transfer.
        response.bytes().await?;
        Ok::<_, reqwest::Error>(status)
    })
    .await;

    match result {
        Ok(Ok(status)) if status.as_u16() >= 200 && status.as_u16() < 400 => {
            let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(url = %url, status = status.as_u16(), latency_ms, "Request probe successful");
            ProbeOutcome::up(latency_ms)
        }
        Ok(Ok(status)) => {
            tracing::warn!(url = %url, status = status.as_u16(), "Request probe got non-success status");
            ProbeOutcome::down(format!("HTTP {}", status.as_u16()))
        }
        Ok(Err(e)) => {
            tracing::warn!(url = %url, error = %e, "Request probe failed");
            ProbeOutcome::down(e.to_string())
        }
        Err(_) => {
            tracing::warn!(url = %url, timeout_ms = probe_timeout.as_millis(), "Request probe timed out");
            ProbeOutcome::down(TIMEOUT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a canned HTTP/1.1 response on a local port.
    async fn spawn_responder(status_line: &'static str, body: &'static str) -> Option<SocketAddr> {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(l) => l,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => return None,
            Err(e) => panic!("Failed to bind test listener: {e}"),
        };
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        Some(addr)
    }

    #[tokio::test]
    async fn test_probe_success_status() {
        let Some(addr) = spawn_responder("200 OK", "ok").await else {
            return;
        };
        let client = Client::new();

        let outcome = probe(&client, &format!("http://{addr}/"), Duration::from_secs(2)).await;
        assert!(outcome.is_up(), "expected UP, got {outcome:?}");
        assert!(outcome.latency_ms().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_probe_redirect_status_is_up() {
        let Some(addr) = spawn_responder("302 Found", "").await else {
            return;
        };
        // No redirect following needed; 3xx is inside the success band.
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let outcome = probe(&client, &format!("http://{addr}/"), Duration::from_secs(2)).await;
        assert!(outcome.is_up(), "expected UP, got {outcome:?}");
    }

    #[tokio::test]
    async fn test_probe_error_status_names_code() {
        let Some(addr) = spawn_responder("404 Not Found", "missing").await else {
            return;
        };
        let client = Client::new();

        let outcome = probe(&client, &format!("http://{addr}/"), Duration::from_secs(2)).await;
        assert!(!outcome.is_up());
        assert_eq!(outcome.error(), Some("HTTP 404"));
    }

    #[tokio::test]
    async fn test_probe_connection_refused() {
        let client = Client::new();
        let outcome = probe(&client, "http://127.0.0.1:1/", Duration::from_secs(1)).await;
        assert!(!outcome.is_up());
        assert!(!outcome.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_probe_malformed_url_is_down() {
        let client = Client::new();
        let outcome = probe(&client, "https://exa mple.com", Duration::from_secs(1)).await;
        assert!(!outcome.is_up());
    }
}
