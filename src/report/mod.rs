//! Report module - chart specs, sinks and the report generator

pub mod chart;
pub mod generator;
pub mod json;
pub mod sink;
pub mod terminal;

pub use chart::*;
pub use generator::*;
pub use json::*;
pub use sink::*;
pub use terminal::*;
