//! Report sink abstraction
//!
//! The generator only talks to a [`ReportSink`]; terminal and JSON output are
//! two implementations, and tests record blocks in memory.

use anyhow::Result;
use serde::Serialize;

use crate::report::chart::{Chart, TableBlock};

/// Destination for report blocks, in emission order
pub trait ReportSink {
    /// Open a section. `depth` 0 is a top-level tab, 1 a sub-tab, 2 a column heading.
    fn begin_section(&mut self, title: &str, depth: usize) -> Result<()>;

    fn add_text(&mut self, text: &str) -> Result<()>;

    fn add_table(&mut self, table: &TableBlock) -> Result<()>;

    fn add_chart(&mut self, chart: &Chart) -> Result<()>;

    /// Called once after the last block
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One emitted block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportBlock {
    Section { title: String, depth: usize },
    Text { text: String },
    Table(TableBlock),
    Chart(Chart),
}

/// Sink that keeps every block in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub blocks: Vec<ReportBlock>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, usize)> {
        self.blocks.iter().filter_map(|b| match b {
            ReportBlock::Section { title, depth } => Some((title.as_str(), *depth)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            ReportBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.blocks.iter().filter_map(|b| match b {
            ReportBlock::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks.iter().filter_map(|b| match b {
            ReportBlock::Chart(c) => Some(c),
            _ => None,
        })
    }
}

impl ReportSink for RecordingSink {
    fn begin_section(&mut self, title: &str, depth: usize) -> Result<()> {
        self.blocks.push(ReportBlock::Section {
            title: title.to_string(),
            depth,
        });
        Ok(())
    }

    fn add_text(&mut self, text: &str) -> Result<()> {
        self.blocks.push(ReportBlock::Text {
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_table(&mut self, table: &TableBlock) -> Result<()> {
        self.blocks.push(ReportBlock::Table(table.clone()));
        Ok(())
    }

    fn add_chart(&mut self, chart: &Chart) -> Result<()> {
        self.blocks.push(ReportBlock::Chart(chart.clone()));
        Ok(())
    }
}
