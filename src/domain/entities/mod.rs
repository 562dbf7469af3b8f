pub mod search_result;
pub mod vector;
