use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;

/// One isolated query against a single OS resource subsystem.
///
/// `sample` is best-effort: sub-parts it cannot read are omitted or zeroed
/// inside the returned value rather than reported as errors. An `Err` means
/// the whole subsystem was unreadable; the assembler substitutes the
/// output's default value in that case, so implementations should reserve
/// `Err` for genuinely total failures.
pub trait Probe: Send + Sync {
    type Output: Default + Send + 'static;

    fn name(&self) -> &'static str;

    fn sample(&self) -> Result<Self::Output>;
}

/// Runs a probe on the blocking pool under a timeout.
///
/// Every failure mode (error return, panic, timeout) collapses to the
/// output's default value with a warning log, so a broken probe can never
/// fail or stall snapshot assembly.
pub(crate) async fn run_probe<T>(probe: Arc<dyn Probe<Output = T>>, timeout: Duration) -> T
where
    T: Default + Send + 'static,
{
    let name = probe.name();
    let task = tokio::task::spawn_blocking(move || probe.sample());

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(value))) => value,
        Ok(Ok(Err(error))) => {
            tracing::warn!(probe = name, %error, "probe failed, substituting default");
            T::default()
        }
        Ok(Err(join_error)) => {
            tracing::warn!(probe = name, %join_error, "probe panicked, substituting default");
            T::default()
        }
        Err(_) => {
            tracing::warn!(
                probe = name,
                timeout_ms = timeout.as_millis() as u64,
                "probe timed out, substituting default"
            );
            T::default()
        }
    }
}
