pub mod coordinator;
pub mod insert;
pub mod merge;
pub mod nearest;
