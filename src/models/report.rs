use serde::Serialize;

use crate::models::StatusRecord;

/// Aggregated result of one monitoring run, in service declaration order
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub records: Vec<StatusRecord<'a>>,
    pub running_count: usize,
    pub total: usize,
    pub all_healthy: bool,
}

impl<'a> Report<'a> {
    pub fn new(records: Vec<StatusRecord<'a>>) -> Self {
        let running_count = records.iter().filter(|r| r.is_running()).count();
        let total = records.len();

        Self {
            records,
            running_count,
            total,
            all_healthy: running_count == total,
        }
    }

    /// `true` when every record is running
    pub fn all_healthy(&self) -> bool {
        self.all_healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reachability, ServiceSpec};

    fn report_for<'a>(services: &'a [ServiceSpec], states: &[Reachability]) -> Report<'a> {
        let records = services
            .iter()
            .zip(states)
            .map(|(s, r)| StatusRecord::new(s, *r, None))
            .collect();
        Report::new(records)
    }

    #[test]
    fn test_all_running_is_healthy() {
        let services = ServiceSpec::defaults();
        let report = report_for(&services, &[Reachability::Running; 4]);
        assert_eq!(report.running_count, 4);
        assert_eq!(report.total, 4);
        assert!(report.all_healthy());
    }

    #[test]
    fn test_mixed_is_unhealthy() {
        let services = ServiceSpec::defaults();
        let report = report_for(
            &services,
            &[
                Reachability::Running,
                Reachability::Stopped,
                Reachability::Running,
                Reachability::Running,
            ],
        );
        assert_eq!(report.running_count, 3);
        assert!(!report.all_healthy());
    }

    #[test]
    fn test_none_running_is_unhealthy() {
        let services = ServiceSpec::defaults();
        let report = report_for(&services, &[Reachability::Stopped; 4]);
        assert_eq!(report.running_count, 0);
        assert!(!report.all_healthy());
    }

    #[test]
    fn test_serializes_lowercase_state() {
        let services = vec![ServiceSpec::new("API Service", 8080, "HTTP", "api-service")];
        let report = Report::new(vec![StatusRecord::new(&services[0], Reachability::Stopped, Some(42))]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["records"][0]["reachable"], "stopped");
        assert_eq!(json["records"][0]["pid"], 42);
        assert_eq!(json["records"][0]["service"]["name"], "API Service");
        assert_eq!(json["all_healthy"], false);
    }
}
