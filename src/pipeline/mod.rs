//! Pipeline module - loading, target encoding and the four summarizers

pub mod categorical;
pub mod columns;
pub mod config;
pub mod correlation;
pub mod loader;
pub mod numeric;
pub mod outliers;
pub mod stats;
pub mod target;

pub use categorical::*;
pub use columns::*;
pub use config::*;
pub use correlation::*;
pub use loader::*;
pub use numeric::*;
pub use outliers::*;
pub use target::*;
