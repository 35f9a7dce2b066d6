// src/main.rs

//! A small command-line tool for querying a munin node.

use anyhow::{Result, bail};
use munin_client::MuninError;
use std::env;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

const USAGE: &str = "Usage: munin-client <host:port> <list [node] | nodes | version | config <metric> | fetch <metric>>";

#[tokio::main]
async fn main() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().collect();

    // Handle the --version flag.
    if args.contains(&"--version".to_string()) {
        println!("munin-client version {VERSION}");
        return Ok(());
    }

    // Setup logging; quiet by default, overridable via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .with_ansi(true)
        .init();

    if args.len() < 3 {
        bail!("{USAGE}");
    }
    let addr = &args[1];
    let command = args[2].as_str();
    let arg = args.get(3).map(String::as_str);

    let mut conn = munin_client::connect(addr.as_str()).await?;
    info!(host = conn.host(), "connected to munin node");

    match (command, arg) {
        ("list", None) => {
            for metric in conn.list().await? {
                println!("{metric}");
            }
        }
        ("list", Some(node)) => {
            for metric in conn.list_node(node).await? {
                println!("{metric}");
            }
        }
        ("nodes", None) => {
            for node in conn.nodes().await? {
                println!("{node}");
            }
        }
        ("version", None) => {
            println!("{}", conn.version().await?);
        }
        ("config", Some(metric)) => match conn.config(metric).await {
            Ok(config) => {
                for (key, value) in &config {
                    println!("{key} {value}");
                }
            }
            Err(MuninError::MetricNotFound) => bail!("node has no metric named '{metric}'"),
            Err(e) => return Err(e.into()),
        },
        ("fetch", Some(metric)) => match conn.fetch(metric).await {
            Ok(data) => {
                for (key, value) in &data {
                    println!("{key} {value}");
                }
            }
            Err(MuninError::MetricNotFound) => bail!("node has no metric named '{metric}'"),
            Err(e) => return Err(e.into()),
        },
        _ => bail!("{USAGE}"),
    }

    conn.close();
    Ok(())
}
