use super::{MemoryCounters, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn memory_counters() -> Option<MemoryCounters> {
        let contents = std::fs::read_to_string("/proc/meminfo").ok()?;
        parse_meminfo(&contents)
    }
}

// /proc/meminfo lines look like "Buffers:          123456 kB".
fn parse_meminfo(contents: &str) -> Option<MemoryCounters> {
    let mut buffers = None;
    let mut cached = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Buffers:") {
            buffers = parse_kb(rest);
        } else if let Some(rest) = line.strip_prefix("Cached:") {
            cached = parse_kb(rest);
        }
        if buffers.is_some() && cached.is_some() {
            break;
        }
    }
    Some(MemoryCounters {
        buffers: buffers?,
        cached: cached?,
    })
}

fn parse_kb(rest: &str) -> Option<u64> {
    let value: u64 = rest.trim().trim_end_matches(" kB").trim().parse().ok()?;
    Some(value * 1024)
}
