//! Backend-neutral report blocks: tables and chart specs
//!
//! Sinks decide how to draw these; the summarizers only describe them.

use serde::Serialize;

/// A titled table of pre-formatted cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            title: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Dash,
    Dot,
}

/// Vertical marker drawn over a histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub title: String,
    pub column: String,
    pub bins: Vec<HistogramBin>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl Histogram {
    /// Bin values into `bin_count` equal-width bins over [min, max].
    ///
    /// The last bin is closed on the right. A constant column collapses to a
    /// single bin; an empty one has no bins.
    pub fn from_values(
        title: impl Into<String>,
        column: impl Into<String>,
        values: &[f64],
        bin_count: usize,
        reference_lines: Vec<ReferenceLine>,
    ) -> Self {
        let bins = bin_values(values, bin_count);
        Self {
            title: title.into(),
            column: column.into(),
            bins,
            reference_lines,
        }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

fn bin_values(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}

/// Colour ramp used for continuous bar colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    Teal,
    Viridis,
    /// One colour per bar, cycling through a fixed palette
    Palette,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text printed next to the bar
    pub text: String,
    /// Value mapped onto the colour scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_scale: ColorScale,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Histogram(Histogram),
    Bar(BarChart),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let hist = Histogram::from_values("h", "x", &values, 30, Vec::new());

        assert_eq!(hist.bins.len(), 30);
        assert_eq!(hist.total(), 100);
        assert_eq!(hist.bins[0].lower, 0.0);
        assert_eq!(hist.bins[29].upper, 99.0);
        // max lands in the last bin
        assert!(hist.bins[29].count > 0);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let constant = Histogram::from_values("h", "x", &[2.0, 2.0, 2.0], 30, Vec::new());
        assert_eq!(constant.bins.len(), 1);
        assert_eq!(constant.bins[0].count, 3);

        let empty = Histogram::from_values("h", "x", &[], 30, Vec::new());
        assert!(empty.bins.is_empty());
    }

    #[test]
    fn test_chart_serializes_with_kind_tag() {
        let chart = Chart::Bar(BarChart {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            color_scale: ColorScale::Teal,
            bars: vec![],
        });
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["color_scale"], "teal");
    }
}
