use hostpulse::telemetry::snapshot::{
    AnomalyReport, AttackInfo, CpuStats, DiskStats, MemoryStats, NetIfaceStats, ProcessInfo,
    Snapshot,
};
use serde_json::Value;

fn full_snapshot() -> Snapshot {
    Snapshot {
        cpu: CpuStats {
            usage_per_core: vec![12.5, 3.0],
            load_average: [0.5, 0.4, 0.3],
        },
        memory: MemoryStats {
            total: 16384,
            used: 9000,
            free: 6000,
            buffers: None,
            cache: Some(2_147_483_648),
            swap_total: 2048,
            swap_used: 512,
        },
        disks: vec![DiskStats {
            name: "/dev/nvme0n1p2".to_string(),
            total: 512,
            used: 300,
            percent: 58.6,
        }],
        network: vec![NetIfaceStats {
            name: "wlan0".to_string(),
            rx_mb: 1043.21,
            tx_mb: 87.09,
        }],
        total_processes: 2,
        top_processes: vec![ProcessInfo {
            pid: 4242,
            name: Some("postgres".to_string()),
            cpu_percent: Some(12.5),
            memory_mb: Some(1024),
        }],
        uptime: "3 days, 4:05:06".to_string(),
        ddos: AnomalyReport::NoAttack,
    }
}

#[test]
fn document_matches_frontend_contract() {
    let value = serde_json::to_value(full_snapshot()).unwrap();

    let cpu = &value["cpu"];
    assert_eq!(cpu["usagePerCore"], serde_json::json!([12.5, 3.0]));
    assert_eq!(cpu["loadAverage"].as_array().unwrap().len(), 3);

    let memory = &value["memory"];
    assert_eq!(memory["total"], 16384);
    assert_eq!(memory["swapTotal"], 2048);
    assert_eq!(memory["swapUsed"], 512);
    assert!(memory["buffers"].is_null());
    assert_eq!(memory["cache"], 2_147_483_648u64);

    let disk = &value["disks"][0];
    assert_eq!(disk["name"], "/dev/nvme0n1p2");
    assert_eq!(disk["percent"], 58.6);

    let iface = &value["network"][0];
    assert_eq!(iface["rxMBps"], 1043.21);
    assert_eq!(iface["txMBps"], 87.09);

    assert_eq!(value["totalProcesses"], 2);
    assert_eq!(value["uptime"], "3 days, 4:05:06");
    assert_eq!(value["ddos"]["attackDetected"], false);
}

#[test]
fn process_rows_keep_scan_field_names() {
    let value = serde_json::to_value(full_snapshot()).unwrap();
    let row = value["topProcesses"][0].as_object().unwrap();

    assert_eq!(row["pid"], 4242);
    assert_eq!(row["name"], "postgres");
    assert_eq!(row["cpu_percent"], 12.5);
    assert_eq!(row["memory_mb"], 1024);
}

#[test]
fn attack_report_replaces_the_single_flag_shape() {
    let mut snapshot = full_snapshot();
    snapshot.ddos = AnomalyReport::AttackDetected(AttackInfo {
        attack_type: "SYN Flood".to_string(),
        packet_rate: 500_000,
        duration_seconds: 120,
        bandwidth_spike_percent: 300,
        source_ips: vec!["10.0.0.5".to_string()],
    });

    let value = serde_json::to_value(&snapshot).unwrap();
    let ddos = value["ddos"].as_object().unwrap();
    assert_eq!(ddos["attackDetected"], true);
    assert_eq!(ddos["attackType"], "SYN Flood");
    assert_eq!(ddos["packetRate"], 500_000);
    assert_eq!(ddos["sourceIPs"], serde_json::json!(["10.0.0.5"]));
    assert_eq!(ddos.len(), 6);
}

#[test]
fn a_report_is_never_both_variants() {
    // The no-attack shape must not leak payload keys, and vice versa.
    let quiet = serde_json::to_value(AnomalyReport::NoAttack).unwrap();
    let quiet = quiet.as_object().unwrap();
    assert_eq!(quiet.len(), 1);
    assert!(!quiet.contains_key("attackType"));

    let noisy = serde_json::to_value(AnomalyReport::AttackDetected(AttackInfo {
        attack_type: "Load Spike".to_string(),
        packet_rate: 0,
        duration_seconds: 0,
        bandwidth_spike_percent: 25,
        source_ips: Vec::new(),
    }))
    .unwrap();
    assert_eq!(noisy["attackDetected"], true);
    assert!(noisy.as_object().unwrap().contains_key("attackType"));
}

#[test]
fn stable_document_round_trips_as_json() {
    let text = serde_json::to_string(&full_snapshot()).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed.as_object().unwrap().len(), 8);
}
