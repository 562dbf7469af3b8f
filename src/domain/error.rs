use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Shard {shard} failed: {message}")]
    Upstream { shard: String, message: String },

    #[error("Shard {shard} did not respond within {after_ms}ms")]
    ShardTimeout { shard: String, after_ms: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn upstream(shard: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Upstream {
            shard: shard.into(),
            message: message.into(),
        }
    }

    /// True for failures caused by a shard rather than by the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DomainError::Upstream { .. } | DomainError::ShardTimeout { .. }
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::BadRequest(format!("Invalid JSON: {e}"))
    }
}
