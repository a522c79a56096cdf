//! JSON report output
//!
//! Collects blocks like [`RecordingSink`] and writes one JSON document on
//! `finish`, so any front-end can draw the chart specs.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::report::chart::{Chart, TableBlock};
use crate::report::sink::{RecordingSink, ReportBlock, ReportSink};

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub edalens_version: String,
    pub train_file: String,
    pub test_file: String,
    pub target_column: String,
}

impl ReportMetadata {
    pub fn new(train_file: &str, test_file: &str, target_column: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            edalens_version: env!("CARGO_PKG_VERSION").to_string(),
            train_file: train_file.to_string(),
            test_file: test_file.to_string(),
            target_column: target_column.to_string(),
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: &'a ReportMetadata,
    blocks: &'a [ReportBlock],
}

/// Sink that serializes the whole report as pretty JSON to a writer
pub struct JsonSink<W: Write> {
    metadata: ReportMetadata,
    recorder: RecordingSink,
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(metadata: ReportMetadata, writer: W) -> Self {
        Self {
            metadata,
            recorder: RecordingSink::new(),
            writer,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn begin_section(&mut self, title: &str, depth: usize) -> Result<()> {
        self.recorder.begin_section(title, depth)
    }

    fn add_text(&mut self, text: &str) -> Result<()> {
        self.recorder.add_text(text)
    }

    fn add_table(&mut self, table: &TableBlock) -> Result<()> {
        self.recorder.add_table(table)
    }

    fn add_chart(&mut self, chart: &Chart) -> Result<()> {
        self.recorder.add_chart(chart)
    }

    fn finish(&mut self) -> Result<()> {
        let doc = JsonDocument {
            metadata: &self.metadata,
            blocks: &self.recorder.blocks,
        };
        serde_json::to_writer_pretty(&mut self.writer, &doc)
            .context("Failed to serialize JSON report")?;
        writeln!(self.writer).context("Failed to write JSON report")?;
        self.writer.flush().context("Failed to flush JSON report")?;
        Ok(())
    }
}
