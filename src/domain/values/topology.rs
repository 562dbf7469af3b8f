use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_SHARDS: [&str; 3] = [
    "http://localhost:8081",
    "http://localhost:8082",
    "http://localhost:8083",
];

/// Base URL of one shard node, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardEndpoint(String);

impl ShardEndpoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl FromStr for ShardEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(DomainError::Config("Shard endpoint is empty".into()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(DomainError::Config(format!(
                "Shard endpoint must start with http:// or https://, got {trimmed}"
            )));
        }
        Ok(ShardEndpoint(trimmed.to_string()))
    }
}

impl fmt::Display for ShardEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, non-empty shard list fixed for the lifetime of a coordinator.
#[derive(Debug, Clone)]
pub struct ShardTopology {
    shards: Arc<[ShardEndpoint]>,
}

impl ShardTopology {
    pub fn new(shards: Vec<ShardEndpoint>) -> Result<Self, DomainError> {
        if shards.is_empty() {
            return Err(DomainError::Config(
                "Shard topology needs at least one shard".into(),
            ));
        }
        Ok(Self {
            shards: shards.into(),
        })
    }

    pub fn parse<S: AsRef<str>>(endpoints: &[S]) -> Result<Self, DomainError> {
        let shards = endpoints
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<ShardEndpoint>, _>>()?;
        Self::new(shards)
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    pub fn get(&self, index: usize) -> &ShardEndpoint {
        &self.shards[index % self.shards.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShardEndpoint> {
        self.shards.iter()
    }
}

impl Default for ShardTopology {
    fn default() -> Self {
        Self {
            shards: DEFAULT_SHARDS
                .iter()
                .map(|s| ShardEndpoint(s.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_topology_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            ShardTopology::parse(&empty),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_index_wraps_modulo_len() {
        let topo = ShardTopology::parse(&["http://a:1", "http://b:2/"]).unwrap();
        assert_eq!(topo.get(0).as_str(), "http://a:1");
        assert_eq!(topo.get(3).as_str(), "http://b:2");
        assert_eq!(topo.get(1).url("/search"), "http://b:2/search");
    }

    #[test]
    fn test_rejects_scheme_less_endpoint() {
        assert!("localhost:8081".parse::<ShardEndpoint>().is_err());
    }

    #[test]
    fn test_default_is_three_local_shards() {
        let topo = ShardTopology::default();
        assert_eq!(topo.len(), 3);
        assert_eq!(topo.get(2).as_str(), "http://localhost:8083");
    }
}
