use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::MonitorConfig;
use crate::services::{default_resolver, PgrepResolver, ProcessResolver, SysinfoResolver};

/// Service Monitor - checks that local services are listening and finds their processes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// JSON file with the service list; the built-in list is used when omitted
    #[arg(short, long, env = "SERVICE_MONITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host the service ports are probed on
    #[arg(long, env = "SERVICE_MONITOR_HOST")]
    pub host: Option<String>,

    /// Per-probe timeout in milliseconds
    #[arg(short, long = "timeout-ms", env = "SERVICE_MONITOR_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// How processes are looked up
    #[arg(long, value_enum, default_value_t = ResolverKind::Auto)]
    pub resolver: ResolverKind,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check every service once and exit non-zero unless all are running
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve health and metrics endpoints, checking on every request
    Serve {
        /// Listen address
        #[arg(short = 'a', long, env = "ADDRESS", default_value = "0.0.0.0")]
        address: String,

        /// Listen port
        #[arg(short, long, env = "PORT", default_value_t = 9999)]
        port: u16,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    /// sysinfo where supported, pgrep otherwise
    Auto,
    Sysinfo,
    Pgrep,
}

impl ResolverKind {
    pub fn build(self, guard: Duration) -> Arc<dyn ProcessResolver> {
        match self {
            ResolverKind::Auto => default_resolver(guard),
            ResolverKind::Sysinfo => Arc::new(SysinfoResolver::new(guard)),
            ResolverKind::Pgrep => Arc::new(PgrepResolver::new(guard)),
        }
    }
}

impl CommandArgs {
    /// The config file (or defaults) with command line overrides applied
    pub fn monitor_config(&self) -> anyhow::Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::load(path)?,
            None => MonitorConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Check { json: false })
    }
}
