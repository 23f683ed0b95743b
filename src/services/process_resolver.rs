use async_trait::async_trait;
use futures_util::future::join_all;
use regex::Regex;
use std::ffi::OsStr;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tokio::process::Command;
use tokio::time::timeout;

/// Finds the PID of the process serving a service
#[async_trait]
pub trait ProcessResolver: Send + Sync {
    /// `None` covers both "nothing matched" and "could not look"
    async fn resolve(&self, token: &str) -> Option<u32>;

    /// One answer per token, in token order
    async fn resolve_many(&self, tokens: &[&str]) -> Vec<Option<u32>> {
        join_all(tokens.iter().map(|token| self.resolve(token))).await
    }
}

/// How a process token is compared against a command line.
///
/// Tokens are regular expressions, the same way `pgrep -f` reads them. A
/// token that is not a valid pattern is matched as a literal substring.
#[derive(Debug, Clone)]
pub enum TokenMatcher {
    Pattern(Regex),
    Literal(String),
}

impl TokenMatcher {
    pub fn new(token: &str) -> Self {
        match Regex::new(token) {
            Ok(r) => TokenMatcher::Pattern(r),
            Err(_) => TokenMatcher::Literal(token.to_string()),
        }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            TokenMatcher::Pattern(r) => r.is_match(haystack),
            TokenMatcher::Literal(s) => haystack.contains(s.as_str()),
        }
    }
}

/// All PIDs in `pgrep`-style output, in the order they appear
pub fn parse_pids(output: &str) -> Vec<u32> {
    output
        .split_whitespace()
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// First PID in `pgrep`-style output other than `skip`
pub fn parse_pid_list(output: &str, skip: u32) -> Option<u32> {
    parse_pids(output).into_iter().find(|pid| *pid != skip)
}

/// `None` when `fut` does not finish within `guard`
async fn guarded<F: Future>(guard: Duration, what: &str, fut: F) -> Option<F::Output> {
    match timeout(guard, fut).await {
        Ok(output) => Some(output),
        Err(_) => {
            log::warn!("{} exceeded {:?}", what, guard);
            None
        }
    }
}

/// One row of the process table as seen by the matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub cmdline: String,
    pub exe: String,
    pub name: String,
}

impl ProcessEntry {
    fn matches(&self, matcher: &TokenMatcher) -> bool {
        matcher.is_match(&self.cmdline)
            || (!self.exe.is_empty() && matcher.is_match(&self.exe))
            || matcher.is_match(&self.name)
    }
}

/// Lowest matching PID in a snapshot sorted by PID
pub fn find_process(processes: &[ProcessEntry], matcher: &TokenMatcher) -> Option<u32> {
    processes.iter().find(|p| p.matches(matcher)).map(|p| p.pid)
}

/// The current process table, sorted by PID, without this process
pub fn process_table() -> Vec<ProcessEntry> {
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing()
            .without_tasks()
            .with_cmd(UpdateKind::OnlyIfNotSet)
            .with_exe(UpdateKind::OnlyIfNotSet),
    );

    let own_pid = std::process::id();

    let mut entries: Vec<ProcessEntry> = sys
        .processes()
        .iter()
        .filter(|(pid, _)| pid.as_u32() != own_pid)
        .map(|(pid, process)| ProcessEntry {
            pid: pid.as_u32(),
            cmdline: join_cmd(process.cmd()),
            exe: process
                .exe()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            name: process.name().to_string_lossy().into_owned(),
        })
        .collect();

    entries.sort_unstable_by_key(|e| e.pid);
    entries
}

fn join_cmd(cmd: &[impl AsRef<OsStr>]) -> String {
    cmd.iter()
        .map(|s| s.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves through the OS process table using `sysinfo`.
///
/// A batch of tokens shares a single snapshot of the table.
#[derive(Debug, Clone)]
pub struct SysinfoResolver {
    guard: Duration,
    scan: fn() -> Vec<ProcessEntry>,
}

impl SysinfoResolver {
    pub fn new(guard: Duration) -> Self {
        Self::with_scan(guard, process_table)
    }

    pub(crate) fn with_scan(guard: Duration, scan: fn() -> Vec<ProcessEntry>) -> Self {
        Self { guard, scan }
    }
}

#[async_trait]
impl ProcessResolver for SysinfoResolver {
    async fn resolve(&self, token: &str) -> Option<u32> {
        self.resolve_many(&[token]).await.pop().flatten()
    }

    async fn resolve_many(&self, tokens: &[&str]) -> Vec<Option<u32>> {
        let scan = self.scan;

        let processes = match guarded(self.guard, "Process scan", tokio::task::spawn_blocking(scan)).await {
            Some(Ok(processes)) => processes,
            Some(Err(e)) => {
                log::warn!("Process scan failed: {}", e);
                return vec![None; tokens.len()];
            }
            None => return vec![None; tokens.len()],
        };

        tokens
            .iter()
            .map(|token| {
                let pid = find_process(&processes, &TokenMatcher::new(token));
                log::debug!("'{}' resolved to {:?}", token, pid);
                pid
            })
            .collect()
    }
}

/// Resolves by running `pgrep -f -- <token>`
#[derive(Debug, Clone)]
pub struct PgrepResolver {
    guard: Duration,
}

impl PgrepResolver {
    pub fn new(guard: Duration) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl ProcessResolver for PgrepResolver {
    async fn resolve(&self, token: &str) -> Option<u32> {
        let mut cmd = Command::new("pgrep");
        // Tokens such as `-Dsvc=game` must not be read as options
        cmd.arg("-f").arg("--").arg(token).kill_on_drop(true);

        let output = match guarded(self.guard, "pgrep", cmd.output()).await? {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Could not run pgrep: {}", e);
                return None;
            }
        };

        // pgrep exits 1 when nothing matched, which is not a failure here
        if !output.status.success() && output.stdout.is_empty() {
            log::debug!("pgrep found no process for '{}' ({})", token, output.status);
            return None;
        }

        parse_pid_list(&String::from_utf8_lossy(&output.stdout), std::process::id())
    }
}

/// The OS-native resolver where `sysinfo` supports this platform, `pgrep` elsewhere
pub fn default_resolver(guard: Duration) -> Arc<dyn ProcessResolver> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Arc::new(SysinfoResolver::new(guard))
    } else {
        log::info!("sysinfo does not support this platform, falling back to pgrep");
        Arc::new(PgrepResolver::new(guard))
    }
}
