pub mod error;
pub mod heights;
