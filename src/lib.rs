//! Liveness monitor for locally deployed services.
//!
//! For each configured service the monitor probes its TCP port and, in
//! parallel, looks up the process serving it. Results come back as a
//! [`Report`](models::Report) in declaration order with an overall
//! healthy/unhealthy verdict.
//!
//! ```no_run
//! use std::sync::Arc;
//! use service_monitor::models::ServiceSpec;
//! use service_monitor::services::{default_resolver, ServiceMonitor, TcpProbe, DEFAULT_PROBE_TIMEOUT};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let services = ServiceSpec::defaults();
//! let monitor = ServiceMonitor::new(
//!     "localhost",
//!     Arc::new(TcpProbe::new(DEFAULT_PROBE_TIMEOUT)),
//!     default_resolver(DEFAULT_PROBE_TIMEOUT),
//! );
//! let report = monitor.run(&services).await?;
//! println!("{}/{} running", report.running_count, report.total);
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod services;
pub mod config;
pub mod output;
pub mod state;
pub mod api;
pub mod cli;
pub mod metrics;
