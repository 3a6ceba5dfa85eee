use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One complete telemetry reading, assembled from all probes at a single
/// sampling instant. Self-contained: no field refers to a prior snapshot.
///
/// The serialized field names are a frontend contract and must not change.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub disks: Vec<DiskStats>,
    pub network: Vec<NetIfaceStats>,
    pub total_processes: usize,
    pub top_processes: Vec<ProcessInfo>,
    pub uptime: String,
    pub ddos: AnomalyReport,
}

/// Per-core utilization plus the 1/5/15-minute load averages.
///
/// `usage_per_core` has one entry per logical core in OS index order; its
/// length may change between snapshots on hot-plug systems. On platforms
/// without a native load average the triple is zero-filled.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStats {
    pub usage_per_core: Vec<f32>,
    pub load_average: [f64; 3],
}

/// RAM and swap figures in whole megabytes (round-half-to-even).
///
/// `free` is the OS "available" figure, so `used + free <= total` is not
/// guaranteed. `buffers`/`cache` are platform-native byte counts passed
/// through unconverted; `None` means the platform does not expose them,
/// which is distinct from a reading of zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub buffers: Option<u64>,
    pub cache: Option<u64>,
    pub swap_total: u64,
    pub swap_used: u64,
}

/// Usage of one physical mount, in whole gigabytes (round-half-to-even).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiskStats {
    pub name: String,
    pub total: u64,
    pub used: u64,
    pub percent: f64,
}

/// Cumulative traffic counters for one interface, in megabytes since boot.
///
/// The wire names say `MBps` but these are not rates; the misnomer is
/// inherited from the frontend contract. Computing a true throughput would
/// take two timestamped samples and a delta, which this crate does not do.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetIfaceStats {
    pub name: String,
    #[serde(rename = "rxMBps")]
    pub rx_mb: f64,
    #[serde(rename = "txMBps")]
    pub tx_mb: f64,
}

/// One row of the process table. `name` and the metric fields are `None`
/// when the OS would not reveal them; the ranker treats a missing metric
/// as zero rather than excluding the process.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: Option<String>,
    pub cpu_percent: Option<f32>,
    pub memory_mb: Option<u64>,
}

/// Raw process-table scan result: every readable row, plus the count of
/// all rows seen (including ones skipped as vanished or access-denied).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessTable {
    pub total: usize,
    pub processes: Vec<ProcessInfo>,
}

/// Verdict of the anomaly hook. Exactly one variant per snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnomalyReport {
    #[default]
    NoAttack,
    AttackDetected(AttackInfo),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttackInfo {
    pub attack_type: String,
    pub packet_rate: u64,
    pub duration_seconds: u64,
    pub bandwidth_spike_percent: u64,
    pub source_ips: Vec<String>,
}

// The wire shape is `{"attackDetected": false}` or the full payload with
// `"attackDetected": true`; a derived enum representation cannot produce a
// boolean tag, so the map is written by hand.
impl Serialize for AnomalyReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AnomalyReport::NoAttack => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("attackDetected", &false)?;
                map.end()
            }
            AnomalyReport::AttackDetected(info) => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry("attackDetected", &true)?;
                map.serialize_entry("attackType", &info.attack_type)?;
                map.serialize_entry("packetRate", &info.packet_rate)?;
                map.serialize_entry("durationSeconds", &info.duration_seconds)?;
                map.serialize_entry("bandwidthSpikePercent", &info.bandwidth_spike_percent)?;
                map.serialize_entry("sourceIPs", &info.source_ips)?;
                map.end()
            }
        }
    }
}
