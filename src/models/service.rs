use serde::{Deserialize, Serialize};

/// A locally deployed service that should be listening on a known port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Human readable name
    pub name: String,
    /// TCP port the service listens on
    pub port: u16,
    /// Informational tag such as "HTTP" or "gRPC"; never used for probing
    #[serde(default)]
    pub protocol: String,
    /// Pattern matched against running processes' command lines
    pub process: String,
}

impl ServiceSpec {
    pub fn new(name: &str, port: u16, protocol: &str, process: &str) -> Self {
        Self {
            name: name.to_string(),
            port,
            protocol: protocol.to_string(),
            process: process.to_string(),
        }
    }

    /// The services of the local game backend deployment
    pub fn defaults() -> Vec<ServiceSpec> {
        vec![
            ServiceSpec::new("Game Service", 9090, "gRPC", "./cmd/game-service"),
            ServiceSpec::new("API Service", 8080, "HTTP", "./cmd/api-service"),
            ServiceSpec::new("WebSocket Service", 8081, "WebSocket", "./cmd/websocket-service"),
            ServiceSpec::new("TCP Service", 8082, "TCP", "./cmd/tcp-service"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_is_optional() {
        let spec: ServiceSpec =
            serde_json::from_str(r#"{"name":"API","port":8080,"process":"api-service"}"#).unwrap();
        assert_eq!(spec.protocol, "");
        assert_eq!(spec.port, 8080);
    }

    #[test]
    fn test_defaults_have_distinct_ports() {
        let services = ServiceSpec::defaults();
        let mut ports: Vec<u16> = services.iter().map(|s| s.port).collect();
        ports.sort();
        ports.dedup();
        assert_eq!(ports.len(), services.len());
    }
}
