pub mod app;
pub mod event;
pub mod help;
pub mod input;
pub mod output;
pub mod status;
pub mod theme;
