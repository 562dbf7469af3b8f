pub mod shard_client;
pub mod vector_store;
