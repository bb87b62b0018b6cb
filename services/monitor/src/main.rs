//! gpumon entry point

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gpumon::{
    enumerate_ips, format_ips, CardLocator, MetricsSource, PollStats, Poller, Renderer,
    ReplaySource, RunOptions, SysfsSource,
};
use gpumon_config::{defaults, LoggingConfig, MonitorConfig, OutputFormat};
use gpumon_types::SchemaRegistry;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    watch: WatchArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll gpu_metrics and print the selected fields (default)
    Watch(WatchArgs),

    /// Print the supported table layouts as markdown
    Schema,

    /// Enumerate IP blocks from the IP discovery table
    Ips(IpsArgs),

    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct WatchArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Card index under the DRM root
    #[arg(long)]
    card: Option<usize>,

    /// Read this metrics file instead of discovering the card
    #[arg(long)]
    path: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Print one frame and exit
    #[arg(long)]
    once: bool,

    /// Do not clear the screen between frames
    #[arg(long)]
    no_clear: bool,

    /// Field to print, e.g. `temperature_core[2]` (repeatable)
    #[arg(long = "field")]
    fields: Vec<String>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Replay recorded snapshots instead of reading sysfs (repeatable)
    #[arg(long)]
    replay: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct IpsArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Card index under the DRM root
    #[arg(long)]
    card: Option<usize>,

    /// Print only the first entry per IP name and version
    #[arg(short, long)]
    unique: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Watch(cli.watch)) {
        Command::Watch(args) => watch(args).await,
        Command::Schema => {
            print!("{}", SchemaRegistry::builtin().generate_markdown_table());
            Ok(())
        }
        Command::Ips(args) => ips(args),
        Command::Config(args) => {
            let config = MonitorConfig::load(args.config.as_deref())?;
            init_tracing(&config.logging);
            config.log_loaded(args.config.as_deref());
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn watch(args: WatchArgs) -> Result<()> {
    let mut config = MonitorConfig::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    init_tracing(&config.logging);
    info!("Starting gpumon {}", env!("CARGO_PKG_VERSION"));
    config.log_loaded(args.config.as_deref());
    info!("Supported metrics tables: {}", SchemaRegistry::builtin().supported_revisions());

    let renderer = Renderer::new(&config.display);
    let options = RunOptions {
        interval: Duration::from_millis(config.poll.interval_ms),
        once: args.once,
        max_consecutive_failures: config.poll.max_consecutive_failures,
    };

    let stats = if args.replay.is_empty() {
        let path = metrics_path(&config)?;
        run(Poller::new(SysfsSource::new(path)), &renderer, options).await?
    } else {
        let source = ReplaySource::from_files(&args.replay)?;
        run(Poller::new(source), &renderer, options).await?
    };

    info!(
        "Stopped after {} poll(s): {} decoded, {} failed",
        stats.polls, stats.fresh, stats.failures
    );

    if args.once && stats.fresh == 0 {
        bail!("No metrics sample could be decoded");
    }
    Ok(())
}

async fn run<S: MetricsSource>(
    mut poller: Poller<S>,
    renderer: &Renderer,
    options: RunOptions,
) -> Result<PollStats> {
    let mut out = std::io::stdout();
    poller
        .run(renderer, &mut out, options, shutdown_signal())
        .await
        .context("Metrics poll loop failed")
}

fn ips(args: IpsArgs) -> Result<()> {
    let config = MonitorConfig::load(args.config.as_deref())?;
    init_tracing(&config.logging);
    config.log_loaded(args.config.as_deref());

    let index = args.card.unwrap_or(config.source.card_index);
    let card = CardLocator::new(&config.source.drm_root)
        .card(index)
        .context("No card found")?;

    let ips = enumerate_ips(&card, args.unique)?;
    if ips.is_empty() {
        warn!("No IP blocks listed under {:?}", card);
    }
    print!("{}", format_ips(&ips));
    Ok(())
}

fn apply_overrides(config: &mut MonitorConfig, args: &WatchArgs) {
    if let Some(card) = args.card {
        config.source.card_index = card;
    }
    if let Some(path) = &args.path {
        config.source.metrics_path = Some(path.clone());
    }
    if let Some(interval_ms) = args.interval_ms {
        config.poll.interval_ms = interval_ms;
    }
    if args.no_clear {
        config.display.clear_screen = false;
    }
    if !args.fields.is_empty() {
        config.display.fields = args.fields.clone();
    }
    if let Some(format) = args.format {
        config.display.format = format;
    }
}

fn metrics_path(config: &MonitorConfig) -> Result<PathBuf> {
    if let Some(path) = &config.source.metrics_path {
        return Ok(path.clone());
    }
    CardLocator::new(&config.source.drm_root)
        .metrics_path(config.source.card_index)
        .with_context(|| {
            format!(
                "Failed to locate gpu_metrics under {}",
                config.source.drm_root.display()
            )
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(defaults::logging::FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(format!("gpumon={},warn", logging.level)))
        .unwrap_or_else(|_| EnvFilter::new("gpumon=info,warn"));

    // Frames go to stdout, logs to stderr
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
