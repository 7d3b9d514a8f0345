//! Target descriptor parsing.
//!
//! Converts a raw target string into the mode-specific address shape:
//! a bare host for echo probes, host plus port for connect probes, or a
//! fully-qualified URL for request probes. Parsing is deterministic and
//! stateless; the same (raw, mode) pair always yields the same
//! descriptor.

use thiserror::Error;

use crate::probe::Mode;

/// Scheme prepended to request-mode targets that carry none.
pub const DEFAULT_SCHEME: &str = "https";

/// Target parse error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    /// Target string is empty or blank.
    #[error("target is empty")]
    Empty,

    /// Connect-mode target has no `host:port` separator.
    #[error("target must include a port (host:port): {0}")]
    MissingPort(String),

    /// Connect-mode port is not an integer in [1, 65535].
    #[error("invalid port in target '{0}'")]
    InvalidPort(String),
}

/// Mode-specific parsed form of a target string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetDescriptor {
    /// Bare hostname or IP literal (echo mode).
    Host(String),
    /// Hostname or IP literal plus port (connect mode).
    HostPort { host: String, port: u16 },
    /// Fully-qualified URL (request mode).
    Url(String),
}

impl TargetDescriptor {
    /// The label used to address this target in output rows.
    pub fn label(&self) -> String {
        match self {
            Self::Host(host) => host.clone(),
            Self::HostPort { host, port } => format!("{host}:{port}"),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Parse a raw target string for the given probe mode.
///
/// - `Echo`: the trimmed string as-is; only non-emptiness is checked.
/// - `Connect`: split on the *first* colon into host and port; a missing
///   separator is an error, never a default port. IPv6 literals are not
///   supported by this split.
/// - `Request`: used as-is when a `://` scheme separator is present,
///   otherwise `https://` is prepended. No further URL validation here;
///   malformed URLs surface as request-probe failures.
///
/// # Errors
/// Returns a [`TargetError`] describing the first violated rule.
pub fn parse(raw: &str, mode: Mode) -> Result<TargetDescriptor, TargetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TargetError::Empty);
    }

    match mode {
        Mode::Echo => Ok(TargetDescriptor::Host(raw.to_string())),
        Mode::Connect => {
            let Some((host, port_str)) = raw.split_once(':') else {
                return Err(TargetError::MissingPort(raw.to_string()));
            };
            let port = port_str
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| TargetError::InvalidPort(raw.to_string()))?;
            Ok(TargetDescriptor::HostPort {
                host: host.to_string(),
                port,
            })
        }
        Mode::Request => {
            let url = if raw.contains("://") {
                raw.to_string()
            } else {
                format!("{DEFAULT_SCHEME}://{raw}")
            };
            Ok(TargetDescriptor::Url(url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_echo_host() {
        let descriptor = parse("8.8.8.8", Mode::Echo).unwrap();
        assert_eq!(descriptor, TargetDescriptor::Host("8.8.8.8".to_string()));
        assert_eq!(descriptor.label(), "8.8.8.8");
    }

    #[test]
    fn test_parse_echo_trims_whitespace() {
        let descriptor = parse("  example.com ", Mode::Echo).unwrap();
        assert_eq!(descriptor, TargetDescriptor::Host("example.com".to_string()));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("", Mode::Echo), Err(TargetError::Empty));
        assert_eq!(parse("   ", Mode::Connect), Err(TargetError::Empty));
        assert_eq!(parse("", Mode::Request), Err(TargetError::Empty));
    }

    #[test]
    fn test_parse_connect_host_port() {
        let descriptor = parse("example.com:443", Mode::Connect).unwrap();
        assert_eq!(
            descriptor,
            TargetDescriptor::HostPort {
                host: "example.com".to_string(),
                port: 443,
            }
        );
        assert_eq!(descriptor.label(), "example.com:443");
    }

    #[test]
    fn test_parse_connect_missing_port() {
        assert_eq!(
            parse("example.com", Mode::Connect),
            Err(TargetError::MissingPort("example.com".to_string()))
        );
    }

    #[test]
    fn test_parse_connect_invalid_port() {
        assert_eq!(
            parse("example.com:http", Mode::Connect),
            Err(TargetError::InvalidPort("example.com:http".to_string()))
        );
        assert_eq!(
            parse("example.com:0", Mode::Connect),
            Err(TargetError::InvalidPort("example.com:0".to_string()))
        );
        assert_eq!(
            parse("example.com:70000", Mode::Connect),
            Err(TargetError::InvalidPort("example.com:70000".to_string()))
        );
    }

    #[test]
    fn test_parse_connect_splits_on_first_colon() {
        // IPv6 literals are not supported; the first colon wins.
        assert_eq!(
            parse("::1:80", Mode::Connect),
            Err(TargetError::InvalidPort("::1:80".to_string()))
        );
    }

    #[test]
    fn test_parse_request_prepends_scheme() {
        let descriptor = parse("example.com", Mode::Request).unwrap();
        assert_eq!(
            descriptor,
            TargetDescriptor::Url("https://example.com".to_string())
        );
    }

    #[test]
    fn test_parse_request_keeps_explicit_scheme() {
        let descriptor = parse("http://example.com", Mode::Request).unwrap();
        assert_eq!(
            descriptor,
            TargetDescriptor::Url("http://example.com".to_string())
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        for (raw, mode) in [
            ("8.8.8.8", Mode::Echo),
            ("example.com:443", Mode::Connect),
            ("example.com", Mode::Request),
        ] {
            assert_eq!(parse(raw, mode), parse(raw, mode));
        }
    }
}
