pub mod entities;
pub mod error;
pub mod ports;
pub mod router;
pub mod values;
