/// Buffer and page-cache counters in platform-native units (bytes).
///
/// Only exposed where the OS publishes them; callers treat `None` as
/// "unsupported on this platform", never as zero.
#[derive(Clone, Copy, Debug)]
pub struct MemoryCounters {
    pub buffers: u64,
    pub cached: u64,
}

pub trait PlatformExtensions {
    fn memory_counters() -> Option<MemoryCounters>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn memory_counters() -> Option<MemoryCounters> {
    platform_impl::Platform::memory_counters()
}
