use std::fmt;
use std::time::Duration;

use color_eyre::Result;
use sysinfo::{Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::format::{bytes_to_gb, bytes_to_mb, bytes_to_mb_2dp, round_dp};

use super::platform;
use super::probe::Probe;
use super::snapshot::{
    CpuStats, DiskStats, MemoryStats, NetIfaceStats, ProcessInfo, ProcessTable,
};

/// Per-core utilization and load averages.
///
/// Instantaneous CPU percentages need two readings; both are taken inside
/// one `sample` call, separated by `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`,
/// so every snapshot uses the same fixed interval and carries no state
/// between calls.
pub struct CpuProbe;

impl Probe for CpuProbe {
    type Output = CpuStats;

    fn name(&self) -> &'static str {
        "cpu"
    }

    fn sample(&self) -> Result<CpuStats> {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_all();

        let usage_per_core = sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect();
        let load = System::load_average();

        Ok(CpuStats {
            usage_per_core,
            load_average: [load.one, load.five, load.fifteen],
        })
    }
}

/// RAM and swap, rounded to whole megabytes. Buffer/cache counters come
/// from the platform layer and stay `None` where unsupported.
pub struct MemoryProbe;

impl Probe for MemoryProbe {
    type Output = MemoryStats;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn sample(&self) -> Result<MemoryStats> {
        let mut sys = System::new();
        sys.refresh_memory();

        let counters = platform::memory_counters();

        Ok(MemoryStats {
            total: bytes_to_mb(sys.total_memory()),
            used: bytes_to_mb(sys.used_memory()),
            // "free" is the OS available figure; used + free need not add
            // up to total.
            free: bytes_to_mb(sys.available_memory()),
            buffers: counters.map(|c| c.buffers),
            cache: counters.map(|c| c.cached),
            swap_total: bytes_to_mb(sys.total_swap()),
            swap_used: bytes_to_mb(sys.used_swap()),
        })
    }
}

/// One mounted filesystem as enumerated by the OS, before filtering.
#[derive(Clone, Debug)]
pub struct MountEntry {
    pub device: String,
    pub file_system: String,
    pub readable: bool,
    pub writable: bool,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Usage of real mounts only: pseudo and network filesystems are dropped,
/// as is any mount with neither read nor write capability.
pub struct DiskProbe;

impl Probe for DiskProbe {
    type Output = Vec<DiskStats>;

    fn name(&self) -> &'static str {
        "disks"
    }

    fn sample(&self) -> Result<Vec<DiskStats>> {
        let disks = Disks::new_with_refreshed_list();
        let entries = disks
            .iter()
            .map(|disk| MountEntry {
                device: disk.name().to_string_lossy().to_string(),
                file_system: disk.file_system().to_string_lossy().to_string(),
                readable: true,
                writable: !disk.is_read_only(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect();
        Ok(physical_disk_stats(entries))
    }
}

pub(crate) fn physical_disk_stats(entries: Vec<MountEntry>) -> Vec<DiskStats> {
    entries
        .into_iter()
        .filter(|entry| (entry.readable || entry.writable) && !is_special_fs(&entry.file_system))
        .map(|entry| {
            let used = entry.total_bytes.saturating_sub(entry.available_bytes);
            let percent = if entry.total_bytes > 0 {
                round_dp(used as f64 / entry.total_bytes as f64 * 100.0, 1)
            } else {
                0.0
            };
            DiskStats {
                name: entry.device,
                total: bytes_to_gb(entry.total_bytes),
                used: bytes_to_gb(used),
                percent,
            }
        })
        .collect()
}

fn is_special_fs(file_system: &str) -> bool {
    matches!(
        file_system.to_ascii_lowercase().as_str(),
        "proc"
            | "procfs"
            | "sysfs"
            | "devfs"
            | "devtmpfs"
            | "devpts"
            | "tmpfs"
            | "ramfs"
            | "squashfs"
            | "overlay"
            | "autofs"
            | "cgroup"
            | "cgroup2"
            | "nfs"
            | "nfs4"
            | "cifs"
            | "smbfs"
            | "fuse.sshfs"
    )
}

/// Cumulative per-interface traffic counters since boot, in megabytes.
/// Interfaces are sorted by name so the sequence order is stable between
/// snapshots.
pub struct NetworkProbe;

impl Probe for NetworkProbe {
    type Output = Vec<NetIfaceStats>;

    fn name(&self) -> &'static str {
        "network"
    }

    fn sample(&self) -> Result<Vec<NetIfaceStats>> {
        let networks = Networks::new_with_refreshed_list();
        let mut stats: Vec<NetIfaceStats> = networks
            .iter()
            .map(|(name, data)| NetIfaceStats {
                name: name.clone(),
                rx_mb: bytes_to_mb_2dp(data.total_received()),
                tx_mb: bytes_to_mb_2dp(data.total_transmitted()),
            })
            .collect();
        stats.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stats)
    }
}

/// Why a process-table row was skipped during enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanSkip {
    Vanished(u32),
    AccessDenied(u32),
}

impl fmt::Display for ScanSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanSkip::Vanished(pid) => write!(f, "pid {pid} vanished mid-scan"),
            ScanSkip::AccessDenied(pid) => write!(f, "pid {pid} access denied"),
        }
    }
}

/// Folds a stream of scan results into a table. Skipped rows still count
/// toward the total but never abort the scan.
pub fn collect_table<I>(entries: I) -> ProcessTable
where
    I: IntoIterator<Item = Result<ProcessInfo, ScanSkip>>,
{
    let mut total = 0;
    let mut processes = Vec::new();
    for entry in entries {
        total += 1;
        match entry {
            Ok(info) => processes.push(info),
            Err(skip) => tracing::debug!(%skip, "skipping process-table entry"),
        }
    }
    ProcessTable { total, processes }
}

/// Full process-table scan with pid, name, CPU and memory per process.
///
/// Uses the same dual-reading interval as [`CpuProbe`] so per-process CPU
/// figures are real percentages rather than zeros from a cold counter.
/// Rows are sorted by pid, which fixes the tie-break order downstream.
pub struct ProcessTableProbe;

impl Probe for ProcessTableProbe {
    type Output = ProcessTable;

    fn name(&self) -> &'static str {
        "processes"
    }

    fn sample(&self) -> Result<ProcessTable> {
        let mut sys = System::new();
        let refresh = ProcessRefreshKind::nothing().with_cpu().with_memory();
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);

        let mut entries: Vec<Result<ProcessInfo, ScanSkip>> = sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                let name = process.name().to_string_lossy().to_string();
                Ok(ProcessInfo {
                    pid: pid.as_u32(),
                    name: (!name.is_empty()).then_some(name),
                    cpu_percent: Some(process.cpu_usage()),
                    memory_mb: Some(bytes_to_mb(process.memory())),
                })
            })
            .collect();
        entries.sort_by_key(|entry| match entry {
            Ok(info) => info.pid,
            Err(ScanSkip::Vanished(pid) | ScanSkip::AccessDenied(pid)) => *pid,
        });

        Ok(collect_table(entries))
    }
}

/// Wall-clock time since boot.
pub struct UptimeProbe;

impl Probe for UptimeProbe {
    type Output = Duration;

    fn name(&self) -> &'static str {
        "uptime"
    }

    fn sample(&self) -> Result<Duration> {
        Ok(Duration::from_secs(System::uptime()))
    }
}
