//! Edalens: exploratory data analysis reports
//!
//! Merges a train and test dataset, encodes a binary target and summarizes
//! numerical distributions, IQR outliers, categorical frequencies and
//! correlation with the target.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
