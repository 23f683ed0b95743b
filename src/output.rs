use std::fmt::Write;

use crate::models::Report;

/// Terminal summary of a report, one line per service then a totals line
pub fn render(report: &Report<'_>) -> String {
    let mut out = String::new();

    for record in &report.records {
        let service = record.service;
        if record.is_running() {
            let pid = record
                .pid
                .map(|p| p.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let _ = writeln!(
                out,
                "✅ {} ({}) - Port {} - PID: {}",
                service.name, service.protocol, service.port, pid
            );
        } else {
            let _ = write!(
                out,
                "❌ {} ({}) - Port {} - Stopped",
                service.name, service.protocol, service.port
            );
            // A process that is up but not listening yet, or still shutting down
            if let Some(pid) = record.pid {
                let _ = write!(out, " (process {} found)", pid);
            }
            out.push('\n');
        }
    }

    let _ = write!(
        out,
        "\n📊 Summary: {}/{} services running\n",
        report.running_count, report.total
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reachability, ServiceSpec, StatusRecord};

    #[test]
    fn test_render_lines() {
        let services = vec![
            ServiceSpec::new("Game Service", 9090, "gRPC", "game-service"),
            ServiceSpec::new("API Service", 8080, "HTTP", "api-service"),
            ServiceSpec::new("TCP Service", 8082, "TCP", "tcp-service"),
        ];
        let report = Report::new(vec![
            StatusRecord::new(&services[0], Reachability::Running, Some(1234)),
            StatusRecord::new(&services[1], Reachability::Stopped, None),
            StatusRecord::new(&services[2], Reachability::Stopped, Some(99)),
        ]);

        let text = render(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "✅ Game Service (gRPC) - Port 9090 - PID: 1234");
        assert_eq!(lines[1], "❌ API Service (HTTP) - Port 8080 - Stopped");
        assert_eq!(lines[2], "❌ TCP Service (TCP) - Port 8082 - Stopped (process 99 found)");
        assert_eq!(lines[4], "📊 Summary: 1/3 services running");
    }

    #[test]
    fn test_running_without_pid() {
        let services = vec![ServiceSpec::new("API Service", 8080, "HTTP", "api-service")];
        let report = Report::new(vec![StatusRecord::new(&services[0], Reachability::Running, None)]);

        assert!(render(&report).starts_with("✅ API Service (HTTP) - Port 8080 - PID: Unknown\n"));
    }
}
