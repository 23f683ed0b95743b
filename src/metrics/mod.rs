use prometheus::{
    register_gauge_vec_with_registry, register_gauge_with_registry, Encoder, Gauge, GaugeVec,
    Opts, Registry, TextEncoder,
};
use lazy_static::lazy_static;
use sysinfo::System;

use crate::models::Report;

lazy_static! {
    static ref HOSTNAME: String = System::host_name().unwrap_or_else(|| "unknown".to_string());
}

/// Gauges for one snapshot; built fresh per scrape so stale services never linger
pub struct MetricsRegistry {
    registry: Registry,

    pub service_up: GaugeVec,
    pub service_pid_info: GaugeVec,
    pub services_running: Gauge,
    pub services_total: Gauge,
}

impl MetricsRegistry {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let service_up = register_gauge_vec_with_registry!(
            Opts::new("service_up", "Service port accepts connections (1) or not (0)"),
            &["name", "port", "protocol", "hostname"],
            registry
        )?;

        let service_pid_info = register_gauge_vec_with_registry!(
            Opts::new("service_pid_info", "PID of the process matched for a service"),
            &["name", "pid", "hostname"],
            registry
        )?;

        let services_running = register_gauge_with_registry!(
            Opts::new("services_running", "Number of services whose port is reachable"),
            registry
        )?;

        let services_total = register_gauge_with_registry!(
            Opts::new("services_total", "Number of monitored services"),
            registry
        )?;

        Ok(Self {
            registry,
            service_up,
            service_pid_info,
            services_running,
            services_total,
        })
    }

    pub fn record(&self, report: &Report<'_>) {
        let hostname = HOSTNAME.as_str();

        for record in &report.records {
            let service = record.service;
            let port = service.port.to_string();

            self.service_up
                .with_label_values(&[service.name.as_str(), port.as_str(), service.protocol.as_str(), hostname])
                .set(if record.is_running() { 1.0 } else { 0.0 });

            if let Some(pid) = record.pid {
                self.service_pid_info
                    .with_label_values(&[service.name.as_str(), &pid.to_string(), hostname])
                    .set(1.0);
            }
        }

        self.services_running.set(report.running_count as f64);
        self.services_total.set(report.total as f64);
    }

    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
