use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shardvec::application::coordinator::CoordinatorSettings;
use shardvec::cli::commands::{Cli, Commands};
use shardvec::domain::entities::vector::Vector;
use shardvec::domain::ports::shard_client::ShardClient;
use shardvec::domain::values::query::Query;
use shardvec::domain::values::topology::{ShardEndpoint, ShardTopology};
use shardvec::infrastructure::http::server::serve;
use shardvec::infrastructure::http::shard_client::HttpShardClient;
use shardvec::{CoordinatorNode, ShardNode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run_command(cli.command).await
}

async fn run_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Shard { host, port } => {
            let addr = bind_addr(&host, port).await?;
            tracing::info!("Shard running on {}", addr);
            serve(ShardNode::new().router(), addr).await?;
        }
        Commands::Coordinator {
            host,
            port,
            shards,
            shard_timeout_ms,
        } => {
            let addr = bind_addr(&host, port).await?;
            let topology = ShardTopology::parse(&shards)?;
            for (index, shard) in topology.iter().enumerate() {
                tracing::info!(index, shard = %shard, "shard registered");
            }
            let settings = CoordinatorSettings::new(topology)
                .with_shard_timeout(Duration::from_millis(shard_timeout_ms));
            let node = CoordinatorNode::new(settings)?;
            tracing::info!("Coordinator running on {}", addr);
            serve(node.router(), addr).await?;
        }
        Commands::Insert { server, id, vector } => {
            let endpoint: ShardEndpoint = server.parse()?;
            let client = HttpShardClient::new(Duration::from_secs(5))?;
            let payload = serde_json::to_vec(&Vector::new(id, vector))?;
            let reply = client.insert(&endpoint, payload).await?;
            if !reply.is_success() {
                anyhow::bail!(
                    "insert failed with status {}: {}",
                    reply.status,
                    String::from_utf8_lossy(&reply.body)
                );
            }
            println!("{}", String::from_utf8_lossy(&reply.body).trim_end());
        }
        Commands::Search {
            server,
            vector,
            top_k,
            timeout_ms,
        } => {
            let endpoint: ShardEndpoint = server.parse()?;
            let client = HttpShardClient::new(Duration::from_millis(timeout_ms))?;
            let results = client.search(&endpoint, &Query::new(vector, top_k)).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}

async fn bind_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("invalid bind address {host}:{port}"))?
        .next()
        .with_context(|| format!("{host} did not resolve to an address"))
}
