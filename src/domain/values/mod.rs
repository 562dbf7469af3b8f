pub mod distance;
pub mod query;
pub mod topology;
