pub mod port_probe;
pub mod process_resolver;
pub mod monitor;

pub use port_probe::{PortProbe, ProbeError, TcpProbe, DEFAULT_PROBE_TIMEOUT};
pub use process_resolver::{
    default_resolver, find_process, parse_pid_list, parse_pids, process_table, PgrepResolver,
    ProcessEntry, ProcessResolver, SysinfoResolver, TokenMatcher,
};
pub use monitor::ServiceMonitor;
