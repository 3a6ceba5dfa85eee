use super::snapshot::ProcessInfo;

/// Metric the process ranking sorts by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankMetric {
    #[default]
    Cpu,
    Memory,
    Pid,
}

impl RankMetric {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cpu" => Some(RankMetric::Cpu),
            "memory" => Some(RankMetric::Memory),
            "pid" => Some(RankMetric::Pid),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankMetric::Cpu => "cpu",
            RankMetric::Memory => "memory",
            RankMetric::Pid => "pid",
        }
    }
}

/// Top-K ranking: descending by the chosen metric, ties keeping their input
/// order, truncated to `limit`. A missing metric ranks as zero rather than
/// excluding the process, and a `limit` past the end returns everything.
pub fn rank(mut processes: Vec<ProcessInfo>, by: RankMetric, limit: usize) -> Vec<ProcessInfo> {
    processes.sort_by(|a, b| metric_value(b, by).total_cmp(&metric_value(a, by)));
    processes.truncate(limit);
    processes
}

fn metric_value(process: &ProcessInfo, by: RankMetric) -> f64 {
    match by {
        RankMetric::Cpu => process.cpu_percent.unwrap_or(0.0) as f64,
        RankMetric::Memory => process.memory_mb.unwrap_or(0) as f64,
        RankMetric::Pid => process.pid as f64,
    }
}
