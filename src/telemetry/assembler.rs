use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::format::format_uptime;

use super::detector::{AnomalyDetector, DetectorContext};
use super::probe::{Probe, run_probe};
use super::probes::{
    CpuProbe, DiskProbe, MemoryProbe, NetworkProbe, ProcessTableProbe, UptimeProbe,
};
use super::ranker::{RankMetric, rank};
use super::snapshot::{
    CpuStats, DiskStats, MemoryStats, NetIfaceStats, ProcessTable, Snapshot,
};

pub const DEFAULT_TOP_LIMIT: usize = 5;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug)]
pub struct AssembleOptions {
    pub limit: usize,
    pub metric: RankMetric,
    pub probe_timeout: Duration,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        AssembleOptions {
            limit: DEFAULT_TOP_LIMIT,
            metric: RankMetric::default(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl AssembleOptions {
    pub fn from_config(config: &Config) -> Self {
        AssembleOptions {
            limit: config.ranking.limit,
            metric: RankMetric::parse(&config.ranking.metric).unwrap_or_default(),
            probe_timeout: Duration::from_millis(config.sampling.probe_timeout_ms),
        }
    }
}

/// Orchestrates one sampling pass: every probe runs independently with its
/// own failure isolation, the process table is ranked, the anomaly hook
/// runs last over the gathered data, and everything merges into a single
/// [`Snapshot`].
///
/// Holds no mutable state, so one instance may serve any number of
/// concurrent requests.
pub struct Assembler {
    pub cpu: Arc<dyn Probe<Output = CpuStats>>,
    pub memory: Arc<dyn Probe<Output = MemoryStats>>,
    pub disks: Arc<dyn Probe<Output = Vec<DiskStats>>>,
    pub network: Arc<dyn Probe<Output = Vec<NetIfaceStats>>>,
    pub processes: Arc<dyn Probe<Output = ProcessTable>>,
    pub uptime: Arc<dyn Probe<Output = Duration>>,
    pub detector: Arc<dyn AnomalyDetector>,
    pub options: AssembleOptions,
}

impl Assembler {
    /// Assembler wired to the real OS probes.
    pub fn host(options: AssembleOptions, detector: Arc<dyn AnomalyDetector>) -> Self {
        Assembler {
            cpu: Arc::new(CpuProbe),
            memory: Arc::new(MemoryProbe),
            disks: Arc::new(DiskProbe),
            network: Arc::new(NetworkProbe),
            processes: Arc::new(ProcessTableProbe),
            uptime: Arc::new(UptimeProbe),
            detector,
            options,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::host(
            AssembleOptions::from_config(config),
            super::detector::from_config(&config.detector),
        )
    }

    /// Gathers one snapshot. Infallible: a failed, panicked or timed-out
    /// probe degrades its own field to the documented zero/empty default
    /// and the rest of the snapshot is unaffected.
    pub async fn assemble(&self) -> Snapshot {
        let timeout = self.options.probe_timeout;
        let (cpu, memory, disks, network, table, uptime) = tokio::join!(
            run_probe(Arc::clone(&self.cpu), timeout),
            run_probe(Arc::clone(&self.memory), timeout),
            run_probe(Arc::clone(&self.disks), timeout),
            run_probe(Arc::clone(&self.network), timeout),
            run_probe(Arc::clone(&self.processes), timeout),
            run_probe(Arc::clone(&self.uptime), timeout),
        );

        let top_processes = rank(table.processes, self.options.metric, self.options.limit);

        let ddos = self.detector.detect(&DetectorContext {
            cpu: &cpu,
            network: &network,
        });

        Snapshot {
            cpu,
            memory,
            disks,
            network,
            total_processes: table.total,
            top_processes,
            uptime: format_uptime(uptime),
            ddos,
        }
    }
}
