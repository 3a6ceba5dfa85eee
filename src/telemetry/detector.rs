use std::sync::Arc;

use rand::Rng;

use crate::config::DetectorConfig;

use super::snapshot::{AnomalyReport, AttackInfo, CpuStats, NetIfaceStats};

/// Already-gathered probe data the detector may base its verdict on. The
/// hook runs after all probes, so a real implementation can inspect
/// network and CPU readings from the same sampling instant.
pub struct DetectorContext<'a> {
    pub cpu: &'a CpuStats,
    pub network: &'a [NetIfaceStats],
}

/// Pluggable attack detector, invoked once per snapshot.
///
/// Implementations must be synchronous, side-effect-free and of bounded
/// latency, and must return exactly one report variant per call.
pub trait AnomalyDetector: Send + Sync {
    fn detect(&self, context: &DetectorContext<'_>) -> AnomalyReport;
}

/// Reference stand-in: fires with a fixed probability and returns a canned
/// payload, ignoring the context. Exists to exercise the reporting path
/// until a real detector replaces it.
pub struct RandomDetector {
    pub probability: f64,
}

impl AnomalyDetector for RandomDetector {
    fn detect(&self, _context: &DetectorContext<'_>) -> AnomalyReport {
        if rand::thread_rng().r#gen::<f64>() < self.probability {
            AnomalyReport::AttackDetected(AttackInfo {
                attack_type: "SYN Flood".to_string(),
                packet_rate: 500_000,
                duration_seconds: 120,
                bandwidth_spike_percent: 300,
                source_ips: vec![
                    "192.168.1.100".to_string(),
                    "10.0.0.5".to_string(),
                    "172.16.0.12".to_string(),
                ],
            })
        } else {
            AnomalyReport::NoAttack
        }
    }
}

/// Deterministic substitute: flags an attack when the 1-minute load average
/// reaches `load_factor` times the logical core count.
///
/// Packet rate, duration and source addresses cannot be estimated from a
/// single snapshot, so they report as zero/empty; the spike percentage is
/// how far past the threshold the load sits.
pub struct LoadThresholdDetector {
    pub load_factor: f64,
}

impl AnomalyDetector for LoadThresholdDetector {
    fn detect(&self, context: &DetectorContext<'_>) -> AnomalyReport {
        let cores = context.cpu.usage_per_core.len();
        if cores == 0 || self.load_factor <= 0.0 {
            return AnomalyReport::NoAttack;
        }

        let threshold = self.load_factor * cores as f64;
        let load_1min = context.cpu.load_average[0];
        if load_1min < threshold {
            return AnomalyReport::NoAttack;
        }

        let over_percent = ((load_1min / threshold - 1.0) * 100.0).round() as u64;
        AnomalyReport::AttackDetected(AttackInfo {
            attack_type: "Load Spike".to_string(),
            packet_rate: 0,
            duration_seconds: 0,
            bandwidth_spike_percent: over_percent,
            source_ips: Vec::new(),
        })
    }
}

pub fn from_config(config: &DetectorConfig) -> Arc<dyn AnomalyDetector> {
    match config.kind.as_str() {
        "load-threshold" => Arc::new(LoadThresholdDetector {
            load_factor: config.load_factor,
        }),
        "random" => Arc::new(RandomDetector {
            probability: config.attack_probability,
        }),
        other => {
            tracing::warn!(kind = other, "unknown detector kind, using random stand-in");
            Arc::new(RandomDetector {
                probability: config.attack_probability,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_load(cores: usize, load_1min: f64) -> CpuStats {
        CpuStats {
            usage_per_core: vec![50.0; cores],
            load_average: [load_1min, 0.0, 0.0],
        }
    }

    #[test]
    fn zero_probability_never_fires() {
        let detector = RandomDetector { probability: 0.0 };
        let cpu = CpuStats::default();
        let context = DetectorContext {
            cpu: &cpu,
            network: &[],
        };
        for _ in 0..100 {
            assert_eq!(detector.detect(&context), AnomalyReport::NoAttack);
        }
    }

    #[test]
    fn certain_probability_always_fires_with_full_payload() {
        let detector = RandomDetector { probability: 1.0 };
        let cpu = CpuStats::default();
        let context = DetectorContext {
            cpu: &cpu,
            network: &[],
        };
        for _ in 0..100 {
            match detector.detect(&context) {
                AnomalyReport::AttackDetected(info) => {
                    assert_eq!(info.attack_type, "SYN Flood");
                    assert_eq!(info.source_ips.len(), 3);
                }
                AnomalyReport::NoAttack => panic!("probability 1.0 must always fire"),
            }
        }
    }

    #[test]
    fn load_below_threshold_is_quiet() {
        let cpu = context_with_load(4, 15.9);
        let detector = LoadThresholdDetector { load_factor: 4.0 };
        let context = DetectorContext {
            cpu: &cpu,
            network: &[],
        };
        assert_eq!(detector.detect(&context), AnomalyReport::NoAttack);
    }

    #[test]
    fn load_at_threshold_fires() {
        let cpu = context_with_load(4, 20.0);
        let detector = LoadThresholdDetector { load_factor: 4.0 };
        let context = DetectorContext {
            cpu: &cpu,
            network: &[],
        };
        match detector.detect(&context) {
            AnomalyReport::AttackDetected(info) => {
                assert_eq!(info.attack_type, "Load Spike");
                assert_eq!(info.bandwidth_spike_percent, 25);
                assert!(info.source_ips.is_empty());
            }
            AnomalyReport::NoAttack => panic!("load 20 on 4 cores at factor 4 must fire"),
        }
    }

    #[test]
    fn empty_core_list_is_quiet() {
        let cpu = context_with_load(0, 100.0);
        let detector = LoadThresholdDetector { load_factor: 4.0 };
        let context = DetectorContext {
            cpu: &cpu,
            network: &[],
        };
        assert_eq!(detector.detect(&context), AnomalyReport::NoAttack);
    }
}
