pub mod mapper;
pub mod render;
pub mod svg;
pub mod types;
