//! Pluvia: a terminal calculator for rain water retained over a row of columns.

pub mod diagram;
pub mod parse;
pub mod persistence;
pub mod tui;
pub mod water;
