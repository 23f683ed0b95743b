use futures_util::future::join_all;
use std::iter;
use std::sync::Arc;

use crate::config::{validate_services, ConfigError};
use crate::models::{Report, ServiceSpec, StatusRecord};
use crate::services::{PortProbe, ProcessResolver};

/// Probes every service and resolves its process concurrently, then
/// aggregates the results in declaration order.
///
/// Holds no mutable state, so one monitor can serve any number of runs.
#[derive(Clone)]
pub struct ServiceMonitor {
    host: String,
    probe: Arc<dyn PortProbe>,
    resolver: Arc<dyn ProcessResolver>,
}

impl ServiceMonitor {
    pub fn new(host: &str, probe: Arc<dyn PortProbe>, resolver: Arc<dyn ProcessResolver>) -> Self {
        Self {
            host: host.to_string(),
            probe,
            resolver,
        }
    }

    /// Fails only on an invalid service list, before anything is probed
    pub async fn run<'a>(&self, services: &'a [ServiceSpec]) -> Result<Report<'a>, ConfigError> {
        validate_services(services)?;

        let tokens: Vec<&str> = services.iter().map(|s| s.process.as_str()).collect();

        // Ports are probed one future per service; processes are resolved as one
        // batch so every service sees the same process table
        let (reachability, pids) = tokio::join!(
            join_all(services.iter().map(|s| self.probe.probe(&self.host, s.port))),
            self.resolver.resolve_many(&tokens),
        );

        let records: Vec<StatusRecord<'a>> = services
            .iter()
            .zip(reachability)
            .zip(pids.into_iter().chain(iter::repeat(None)))
            .map(|((service, reachable), pid)| {
                log::debug!(
                    "{} port {} is {}, pid {:?}",
                    service.name,
                    service.port,
                    reachable,
                    pid
                );
                StatusRecord::new(service, reachable, pid)
            })
            .collect();

        let report = Report::new(records);

        log::info!(
            "{}/{} services running on {}",
            report.running_count,
            report.total,
            self.host
        );

        Ok(report)
    }
}
