/// Recording rules the fetcher knows how to read.
///
/// Both are expected to exist in the backend as `<name>_<period>` series
/// labelled with `instance="<node name>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    CpuUsageAvg,
    MemUsageAvg,
}

impl MetricKind {
    /// Query order: CPU first, then memory
    pub const ALL: [MetricKind; 2] = [MetricKind::CpuUsageAvg, MetricKind::MemUsageAvg];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::CpuUsageAvg => "cpu_usage_avg",
            MetricKind::MemUsageAvg => "mem_usage_avg",
        }
    }

    /// Render the instant-query expression for one node over one period
    pub fn expr(&self, period: &str, node_name: &str) -> String {
        format!(
            "{}_{}{{instance=\"{}\"}}",
            self.as_str(),
            period,
            node_name
        )
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_expr() {
        assert_eq!(
            MetricKind::CpuUsageAvg.expr("5m", "worker-1"),
            r#"cpu_usage_avg_5m{instance="worker-1"}"#
        );
    }

    #[test]
    fn test_mem_expr() {
        assert_eq!(
            MetricKind::MemUsageAvg.expr("1h", "10.0.0.7:9100"),
            r#"mem_usage_avg_1h{instance="10.0.0.7:9100"}"#
        );
    }

    #[test]
    fn test_query_order() {
        let names: Vec<_> = MetricKind::ALL.iter().map(MetricKind::as_str).collect();
        assert_eq!(names, vec!["cpu_usage_avg", "mem_usage_avg"]);
    }
}
