use super::{MemoryCounters, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn memory_counters() -> Option<MemoryCounters> {
        // macOS has no buffers/cached split comparable to /proc/meminfo.
        None
    }
}
