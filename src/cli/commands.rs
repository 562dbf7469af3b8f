use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shardvec", about = "Sharded exact vector similarity search")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a shard node holding one partition of the vectors
    Shard {
        #[arg(long, env = "SHARDVEC_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(short, long, env = "SHARDVEC_PORT", default_value = "8081")]
        port: u16,
    },
    /// Run the coordinator that routes inserts and fans out searches
    Coordinator {
        #[arg(long, env = "SHARDVEC_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(short, long, env = "SHARDVEC_PORT", default_value = "8080")]
        port: u16,
        /// Shard base URLs in routing order (repeat or comma separate)
        #[arg(
            long = "shard",
            env = "SHARDVEC_SHARDS",
            value_delimiter = ',',
            default_values_t = default_shards()
        )]
        shards: Vec<String>,
        /// Per-shard request deadline in milliseconds
        #[arg(long, env = "SHARDVEC_SHARD_TIMEOUT_MS", default_value = "2000")]
        shard_timeout_ms: u64,
    },
    /// Insert a vector through a running node
    Insert {
        #[arg(long, default_value = "http://localhost:8080")]
        server: String,
        #[arg(long)]
        id: String,
        /// Embedding (comma separated floats)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        vector: Vec<f64>,
    },
    /// Search a running node for nearest neighbors
    Search {
        #[arg(long, default_value = "http://localhost:8080")]
        server: String,
        /// Query embedding (comma separated floats)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        vector: Vec<f64>,
        /// Number of results, 0 for all
        #[arg(short = 'k', long, default_value = "10")]
        top_k: i64,
        #[arg(long, default_value = "5000")]
        timeout_ms: u64,
    },
}

fn default_shards() -> Vec<String> {
    crate::domain::values::topology::DEFAULT_SHARDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
