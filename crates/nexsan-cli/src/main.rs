//! Nexsan exporter CLI
//!
//! Usage:
//!   nexsan-exporter serve                      Run the HTTP exporter
//!   nexsan-exporter probe <target> --user ...  Probe one array and print metrics
//!   nexsan-exporter translate <file>           Translate a saved status document

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nexsan_client::{Credentials, ProbeClient};
use nexsan_core::ExporterConfig;
use nexsan_metrics::{exposition, translate_str};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nexsan-exporter")]
#[command(author, version, about = "Prometheus exporter for Nexsan storage arrays")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "NEXSAN_EXPORTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP exporter
    Serve(ServeArgs),

    /// Probe a single array and print its metrics
    Probe {
        /// Array address or base URL
        target: String,

        /// Web interface user
        #[arg(short, long, env = "NEXSAN_USER")]
        user: String,

        /// Web interface password
        #[arg(short, long, env = "NEXSAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Translate a saved status document into metrics
    Translate {
        /// Path to an opstats XML document
        file: PathBuf,
    },
}

/// Overrides for configuration file values
#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "NEXSAN_EXPORTER_BIND_ADDRESS")]
    bind_address: Option<IpAddr>,

    /// Port to listen on
    #[arg(short = 'p', long, env = "NEXSAN_EXPORTER_PORT")]
    port: Option<u16>,

    /// Accept only IPv6 connections on an IPv6 address
    #[arg(long, env = "NEXSAN_EXPORTER_BIND_V6ONLY")]
    bind_v6only: Option<bool>,

    /// Worker threads serving probes
    #[arg(long, env = "NEXSAN_EXPORTER_THREAD_COUNT")]
    thread_count: Option<usize>,

    /// Seconds before a probe gives up
    #[arg(long, env = "NEXSAN_EXPORTER_TIMEOUT")]
    timeout: Option<u64>,
}

impl ServeArgs {
    fn apply(self, config: &mut ExporterConfig) {
        if let Some(address) = self.bind_address {
            config.bind_address = address;
        }
        if let Some(port) = self.port {
            config.bind_port = port;
        }
        if self.bind_v6only.is_some() {
            config.bind_v6only = self.bind_v6only;
        }
        if self.thread_count.is_some() {
            config.thread_count = self.thread_count;
        }
        if let Some(timeout) = self.timeout {
            config.probe_timeout_secs = timeout;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so probe output stays clean
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ExporterConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve(args) => {
            args.apply(&mut config);
            config.validate()?;
            runtime(config.thread_count)?.block_on(cmd_serve(config))
        }
        Commands::Probe {
            target,
            user,
            password,
        } => runtime(config.thread_count)?.block_on(cmd_probe(
            &config,
            &target,
            Credentials::new(user, password),
        )),
        Commands::Translate { file } => cmd_translate(&file),
    }
}

fn runtime(thread_count: Option<usize>) -> Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = thread_count {
        builder.worker_threads(threads);
    }
    builder.build().context("Failed to build tokio runtime")
}

async fn cmd_serve(config: ExporterConfig) -> Result<()> {
    info!(
        "Starting nexsan-exporter {} (probe timeout {}s)",
        env!("CARGO_PKG_VERSION"),
        config.probe_timeout_secs
    );
    nexsan_server::run(config).await
}

async fn cmd_probe(config: &ExporterConfig, target: &str, credentials: Credentials) -> Result<()> {
    let client = ProbeClient::new(config.probe_timeout())?;
    let tree = client
        .fetch(target, &credentials)
        .await
        .with_context(|| format!("Probe of {} failed", target))?;
    print!("{}", exposition::encode(&nexsan_metrics::translate(&tree)));
    Ok(())
}

fn cmd_translate(file: &Path) -> Result<()> {
    let xml = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let families =
        translate_str(&xml).with_context(|| format!("Failed to translate {}", file.display()))?;
    info!(
        "Translated {} families ({} samples)",
        families.len(),
        families.sample_count()
    );
    print!("{}", exposition::encode(&families));
    Ok(())
}
