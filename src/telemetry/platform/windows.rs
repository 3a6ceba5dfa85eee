use super::{MemoryCounters, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn memory_counters() -> Option<MemoryCounters> {
        // The standby/cache figures live behind perf counters, not a stable
        // API surface; report unsupported rather than a misleading zero.
        None
    }
}
