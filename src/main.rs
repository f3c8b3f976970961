use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;
use wsdump::{
    config::{Config, TransportConfig, DEFAULT_DIR, DEFAULT_EXTENSION, DEFAULT_PREFIX, DEFAULT_URL},
    receiver::Receiver,
};

//

/// Dump every message of a websocket endpoint into numbered json files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Websocket endpoint (ws:// or wss://)
    #[arg(env = "WSDUMP_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Directory the message files are written into
    #[arg(short, long, env = "WSDUMP_DIR", default_value = DEFAULT_DIR)]
    dir: PathBuf,

    /// File name before the message index
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// File extension, without the dot
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Milliseconds to wait before reconnecting
    #[arg(long, default_value_t = 1000)]
    retry_ms: u64,

    /// Reject messages larger than this many bytes (unlimited if unset)
    #[arg(long)]
    max_message_size: Option<usize>,

    /// Reject frames larger than this many bytes (unlimited if unset)
    #[arg(long)]
    max_frame_size: Option<usize>,

    /// Debug logging, RUST_LOG takes precedence
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

//

impl Args {
    fn into_config(self) -> Config {
        Config::new(self.url)
            .dir(self.dir)
            .prefix(self.prefix)
            .extension(self.extension)
            .retry_delay(Duration::from_millis(self.retry_ms))
            .transport(TransportConfig {
                max_message_size: self.max_message_size,
                max_frame_size: self.max_frame_size,
            })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    // process wide crypto provider for wss://
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("Crypto provider already installed");
    }

    let config = args.into_config();
    tracing::info!(url = %config.url, dir = %config.dir.display(), "Dumping messages");

    tokio::select! {
        _ = Receiver::new(config).run() => {}
        interrupted = tokio::signal::ctrl_c() => {
            interrupted.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let fallback = if verbose { "info,wsdump=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to init logging: {err}"))
}

//
