pub mod server;
pub mod shard_client;
