//! Shared test helpers.
#![allow(dead_code)]

use shardvec::application::coordinator::CoordinatorSettings;
use shardvec::domain::entities::search_result::SearchResult;
use shardvec::domain::entities::vector::Vector;
use shardvec::domain::error::DomainError;
use shardvec::domain::ports::shard_client::{ShardClient, ShardReply};
use shardvec::domain::values::query::Query;
use shardvec::domain::values::topology::{ShardEndpoint, ShardTopology};
use shardvec::infrastructure::http::server::shard_router;
use shardvec::{CoordinatorNode, ShardNode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// How a fake shard answers.
#[derive(Clone)]
pub enum ShardBehavior {
    Healthy(Arc<ShardNode>),
    Slow(Arc<ShardNode>, Duration),
    Down,
    /// Answers every call with the given HTTP status.
    Failing(u16),
}

/// In-process stand-in for the HTTP shard client.
pub struct FakeShardClient {
    shards: HashMap<String, ShardBehavior>,
}

impl FakeShardClient {
    pub fn new(shards: Vec<(String, ShardBehavior)>) -> Self {
        Self {
            shards: shards.into_iter().collect(),
        }
    }

    async fn answer(&self, shard: &ShardEndpoint) -> Answer {
        match self.shards.get(shard.as_str()) {
            Some(ShardBehavior::Healthy(node)) => Answer::Node(node.clone()),
            Some(ShardBehavior::Slow(node, delay)) => {
                tokio::time::sleep(*delay).await;
                Answer::Node(node.clone())
            }
            Some(ShardBehavior::Failing(status)) => Answer::Status(*status),
            Some(ShardBehavior::Down) | None => Answer::Refused,
        }
    }
}

enum Answer {
    Node(Arc<ShardNode>),
    Status(u16),
    Refused,
}

fn refused(shard: &ShardEndpoint) -> DomainError {
    DomainError::upstream(shard.as_str(), "connection refused")
}

#[async_trait::async_trait]
impl ShardClient for FakeShardClient {
    async fn insert(&self, shard: &ShardEndpoint, payload: Vec<u8>) -> Result<ShardReply, DomainError> {
        let node = match self.answer(shard).await {
            Answer::Node(node) => node,
            Answer::Status(status) => {
                return Ok(ShardReply {
                    status,
                    body: br#"{"error":"boom"}"#.to_vec(),
                })
            }
            Answer::Refused => return Err(refused(shard)),
        };
        let outcome = serde_json::from_slice::<Vector>(&payload)
            .map_err(DomainError::from)
            .and_then(|v| node.insert(v));
        Ok(match outcome {
            Ok(ack) => ShardReply {
                status: 200,
                body: serde_json::to_vec(&ack).unwrap(),
            },
            Err(e) => ShardReply {
                status: 400,
                body: serde_json::to_vec(&serde_json::json!({"error": e.to_string()})).unwrap(),
            },
        })
    }

    async fn search(&self, shard: &ShardEndpoint, query: &Query) -> Result<Vec<SearchResult>, DomainError> {
        match self.answer(shard).await {
            Answer::Node(node) => node.search(query),
            Answer::Status(status) => Err(DomainError::upstream(
                shard.as_str(),
                format!("search returned {status}"),
            )),
            Answer::Refused => Err(refused(shard)),
        }
    }
}

pub fn shard_url(i: usize) -> String {
    format!("http://shard-{i}.test")
}

/// A coordinator over `behaviors.len()` fake shards, in topology order.
pub fn fake_coordinator(behaviors: Vec<ShardBehavior>, timeout: Duration) -> CoordinatorNode {
    let urls: Vec<String> = (0..behaviors.len()).map(shard_url).collect();
    let topology = ShardTopology::parse(&urls).unwrap();
    let client = FakeShardClient::new(urls.into_iter().zip(behaviors).collect());
    CoordinatorNode::with_client(
        CoordinatorSettings::new(topology).with_shard_timeout(timeout),
        Arc::new(client),
    )
}

pub fn healthy_shards(n: usize) -> (Vec<Arc<ShardNode>>, Vec<ShardBehavior>) {
    let nodes: Vec<Arc<ShardNode>> = (0..n).map(|_| Arc::new(ShardNode::new())).collect();
    let behaviors = nodes.iter().cloned().map(ShardBehavior::Healthy).collect();
    (nodes, behaviors)
}

pub fn insert_body(id: &str, vector: &[f64]) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({"id": id, "vector": vector})).unwrap()
}

/// Serves a fresh shard node on an ephemeral local port.
pub async fn spawn_shard() -> (String, Arc<ShardNode>) {
    let node = Arc::new(ShardNode::new());
    let url = spawn_router(shard_router(node.clone())).await;
    (url, node)
}

pub async fn spawn_coordinator(shards: &[String], timeout: Duration) -> String {
    let topology = ShardTopology::parse(shards).unwrap();
    let node = CoordinatorNode::new(CoordinatorSettings::new(topology).with_shard_timeout(timeout)).unwrap();
    spawn_router(node.router()).await
}

async fn spawn_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
