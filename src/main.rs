//! ngircd-link - services side of an ngIRCd server link.
//!
//! Reads raw link lines on stdin and writes ours on stdout; logs go to
//! stderr.

use std::time::Duration;

use anyhow::{Context as _, bail};
use ngircd_link::config::{Config, validate};
use ngircd_link::network::LineReader;
use ngircd_link::{PseudoClients, Uplink, protocol};
use ngircd_proto::Message;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ngircd-link.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(path = %config_path, error = %e, "Invalid config");
        }
        bail!("{} configuration error(s) in {config_path}", errors.len());
    }

    let dialect = protocol::find(&config.uplink.protocol)
        .with_context(|| format!("unknown protocol {:?}", config.uplink.protocol))?;

    info!(
        server = %config.server.name,
        uplink = %config.uplink.name,
        protocol = dialect.ircd().name,
        "Starting ngircd-link"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(msg) = rx.recv().await {
            let line = format!("{msg}\r\n");
            if let Err(e) = stdout.write_all(line.as_bytes()).await {
                error!(error = %e, "Uplink write failed");
                break;
            }
            if let Err(e) = stdout.flush().await {
                error!(error = %e, "Uplink flush failed");
                break;
            }
        }
    });

    let hooks = PseudoClients::new(&config.services);
    let mut uplink = Uplink::new(&config, dialect, hooks, Box::new(tx));
    uplink.connect().context("link handshake failed")?;

    let mut lines = LineReader::new(BufReader::new(tokio::io::stdin()));
    let mut ping = tokio::time::interval(Duration::from_secs(config.uplink.ping_interval));
    ping.tick().await;

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => uplink.process_line(&line),
                Ok(None) => {
                    info!("Uplink closed the link");
                    uplink.link_closed();
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Uplink read failed");
                    uplink.link_closed();
                    break;
                }
            },
            _ = ping.tick() => uplink.ping(),
        }

        if uplink.shutdown_requested() {
            info!("Shutting down");
            break;
        }
    }

    let stats = uplink.registry().command_stats();
    info!(?stats, "Command usage");

    drop(uplink);
    writer.await?;
    Ok(())
}
