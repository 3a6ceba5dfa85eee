use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use hostpulse::config::{self, load_config, load_config_from_path};
use hostpulse::telemetry::assembler::Assembler;
use hostpulse::telemetry::ranker::RankMetric;

#[derive(Parser)]
#[command(
    name = "hostpulse",
    about = "Host performance telemetry snapshots as JSON"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of top processes to report
    #[arg(long)]
    limit: Option<usize>,

    /// Ranking metric: cpu, memory, pid
    #[arg(long)]
    metric: Option<String>,

    /// Per-probe timeout in milliseconds
    #[arg(long)]
    probe_timeout_ms: Option<u64>,

    /// Keep emitting snapshots until interrupted, one JSON document per line
    #[arg(long, default_value_t = false)]
    watch: bool,

    /// Delay between snapshots in watch mode, in milliseconds
    #[arg(long, default_value_t = 2000)]
    interval_ms: u64,

    /// Indent the JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Log verbosity on stderr: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log output format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(&cli)?;

    if let Some(ref metric) = cli.metric
        && RankMetric::parse(metric).is_none()
    {
        return Err(eyre!(
            "unknown ranking metric `{metric}` (expected cpu, memory or pid)"
        ));
    }

    let config = load_config_for_cli(&cli);
    let assembler = Assembler::from_config(&config);

    if cli.watch {
        let mut interval = tokio::time::interval(Duration::from_millis(cli.interval_ms.max(1)));
        loop {
            interval.tick().await;
            emit_snapshot(&assembler, cli.pretty).await?;
        }
    }

    emit_snapshot(&assembler, cli.pretty).await
}

/// Snapshot assembly never fails, but emission can (spec-level service
/// error); a serialization failure surfaces as a non-zero exit.
async fn emit_snapshot(assembler: &Assembler, pretty: bool) -> Result<()> {
    let snapshot = assembler.assemble().await;
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let level: tracing::Level = cli
        .log_level
        .parse()
        .map_err(|_| eyre!("unknown log level `{}`", cli.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    match cli.log_format.as_str() {
        "json" => builder.json().init(),
        "text" => builder.init(),
        other => return Err(eyre!("unknown log format `{other}` (expected text or json)")),
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(limit) = cli.limit {
        config.ranking.limit = limit;
    }
    if let Some(ref metric) = cli.metric {
        config.ranking.metric = metric.clone();
    }
    if let Some(timeout) = cli.probe_timeout_ms {
        config.sampling.probe_timeout_ms = timeout;
    }

    config
}
