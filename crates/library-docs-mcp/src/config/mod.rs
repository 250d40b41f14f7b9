//! Configuration loading and resolution.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::types::{McpError, McpResult};

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Resolve the listening port: explicit flag, then `PORT`, then 3000.
pub fn resolve_port(explicit: Option<u16>) -> McpResult<u16> {
    resolve_port_from(explicit, std::env::var(PORT_ENV).ok())
}

fn resolve_port_from(explicit: Option<u16>, env_value: Option<String>) -> McpResult<u16> {
    if let Some(port) = explicit {
        return Ok(port);
    }

    match env_value.as_deref().map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .parse()
            .map_err(|_| McpError::Config(format!("{PORT_ENV}={raw:?} is not a valid port"))),
    }
}

/// Resolve the socket address the HTTP transport binds.
pub fn resolve_listen_addr(host: Option<IpAddr>, port: Option<u16>) -> McpResult<SocketAddr> {
    Ok(SocketAddr::new(
        host.unwrap_or(DEFAULT_HOST),
        resolve_port(port)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(resolve_port_from(None, None).unwrap(), 3000);
        assert_eq!(resolve_port_from(None, Some(String::new())).unwrap(), 3000);
    }

    #[test]
    fn test_env_port() {
        assert_eq!(resolve_port_from(None, Some("8080".into())).unwrap(), 8080);
    }

    #[test]
    fn test_flag_beats_env() {
        assert_eq!(resolve_port_from(Some(9000), Some("8080".into())).unwrap(), 9000);
    }

    #[test]
    fn test_invalid_env_port() {
        let err = resolve_port_from(None, Some("http".into())).unwrap_err();
        assert!(matches!(err, McpError::Config(_)));
        assert!(resolve_port_from(None, Some("70000".into())).is_err());
    }

    #[test]
    fn test_listen_addr() {
        let addr = resolve_listen_addr(Some("127.0.0.1".parse().unwrap()), Some(4000)).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:4000");
    }
}
