//! Styled terminal rendering of report blocks

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::{style, Color, Style};

use crate::report::chart::{BarChart, Chart, ColorScale, Histogram, LineStyle, TableBlock};
use crate::report::sink::ReportSink;
use crate::utils::{print_section_header, print_subsection_header};

/// Widest bar, in characters
const BAR_WIDTH: usize = 40;

const PALETTE: [Color; 3] = [Color::Green, Color::Cyan, Color::Blue];

/// Sink that prints straight to stdout
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

/// Scale `value` against `max` into a bar of at most `width` cells
pub fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let len = (value.abs() / max * width as f64).round() as usize;
    // a non-zero value always gets at least one cell
    if len == 0 && value != 0.0 {
        1
    } else {
        len.min(width)
    }
}

/// Pick a colour for `value` on a scale spanning [min, max]
fn scale_color(scale: ColorScale, value: f64, min: f64, max: f64, index: usize) -> Color {
    if scale == ColorScale::Palette {
        return PALETTE[index % PALETTE.len()];
    }
    let t = if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    };
    match scale {
        ColorScale::Teal => {
            if t < 0.34 {
                Color::White
            } else if t < 0.67 {
                Color::Cyan
            } else {
                Color::Green
            }
        }
        _ => {
            if t < 0.34 {
                Color::Blue
            } else if t < 0.67 {
                Color::Green
            } else {
                Color::Yellow
            }
        }
    }
}

fn render_table(block: &TableBlock) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        block
            .headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    for row in &block.rows {
        table.add_row(row.iter().map(Cell::new));
    }
    table.to_string()
}

/// Reference line labels falling in bin `index`; the last bin's upper edge is inclusive
fn bin_markers(hist: &Histogram, index: usize) -> Vec<String> {
    let bin = &hist.bins[index];
    let is_last = index + 1 == hist.bins.len();
    hist.reference_lines
        .iter()
        .filter(|line| {
            line.value >= bin.lower
                && (line.value < bin.upper || (is_last && line.value == bin.upper))
        })
        .map(|line| {
            let glyph = match line.style {
                LineStyle::Dash => "┆",
                LineStyle::Dot => "┊",
            };
            format!("{} {}", glyph, line.label)
        })
        .collect()
}

fn render_histogram(hist: &Histogram) -> Vec<String> {
    let mut lines = vec![format!("{}", style(&hist.title).bold())];
    let max = hist.bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

    for (index, bin) in hist.bins.iter().enumerate() {
        let markers = bin_markers(hist, index);

        let bar = "█".repeat(bar_length(bin.count as f64, max, BAR_WIDTH));
        lines.push(format!(
            "{:>12.2} │{:<width$} {:>6} {}",
            bin.lower,
            style(bar).green(),
            bin.count,
            style(markers.join(" ")).dim(),
            width = BAR_WIDTH
        ));
    }

    if hist.bins.is_empty() {
        lines.push(format!("{}", style("(no values)").dim()));
    }

    let refs: Vec<String> = hist
        .reference_lines
        .iter()
        .map(|line| format!("{} = {}", line.label, line.value))
        .collect();
    if !refs.is_empty() {
        lines.push(format!("{}", style(refs.join("  ")).dim()));
    }
    lines
}

fn render_bar_chart(chart: &BarChart) -> Vec<String> {
    let mut lines = vec![format!("{}", style(&chart.title).bold())];
    let max = chart
        .bars
        .iter()
        .map(|b| b.value.abs())
        .fold(0.0_f64, f64::max);
    let color_values: Vec<f64> = chart.bars.iter().filter_map(|b| b.color_value).collect();
    let cmin = color_values.iter().copied().fold(f64::INFINITY, f64::min);
    let cmax = color_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    for (i, bar) in chart.bars.iter().enumerate() {
        let color = scale_color(
            chart.color_scale,
            bar.color_value.unwrap_or(bar.value),
            cmin,
            cmax,
            i,
        );
        let glyph = if bar.value < 0.0 { "▒" } else { "█" };
        let cells = glyph.repeat(bar_length(bar.value, max, BAR_WIDTH));
        lines.push(format!(
            "{:>lw$} │{} {}",
            crate::utils::truncate_string(&bar.label, label_width),
            Style::new().fg(color).apply_to(cells),
            bar.text,
            lw = label_width
        ));
    }

    if chart.bars.is_empty() {
        lines.push(format!("{}", style("(no data)").dim()));
    }
    lines.push(format!(
        "{}",
        style(format!("x: {}  y: {}", chart.x_label, chart.y_label)).dim()
    ));
    lines
}

impl ReportSink for TerminalSink {
    fn begin_section(&mut self, title: &str, depth: usize) -> Result<()> {
        match depth {
            0 => print_section_header(title),
            1 => print_subsection_header(title),
            _ => {
                println!();
                println!("    {}", style(title).yellow().bold());
            }
        }
        Ok(())
    }

    fn add_text(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            println!("      {}", line);
        }
        Ok(())
    }

    fn add_table(&mut self, table: &TableBlock) -> Result<()> {
        if let Some(title) = &table.title {
            println!("      {}", style(title).bold());
        }
        for line in render_table(table).lines() {
            println!("      {}", line);
        }
        Ok(())
    }

    fn add_chart(&mut self, chart: &Chart) -> Result<()> {
        let lines = match chart {
            Chart::Histogram(hist) => render_histogram(hist),
            Chart::Bar(bars) => render_bar_chart(bars),
        };
        println!();
        for line in lines {
            println!("      {}", line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_scaling() {
        assert_eq!(bar_length(10.0, 10.0, 40), 40);
        assert_eq!(bar_length(5.0, 10.0, 40), 20);
        assert_eq!(bar_length(-5.0, 10.0, 40), 20);
        assert_eq!(bar_length(0.01, 10.0, 40), 1);
        assert_eq!(bar_length(0.0, 10.0, 40), 0);
        assert_eq!(bar_length(3.0, 0.0, 40), 0);
    }

    #[test]
    fn test_render_table_contains_cells() {
        let mut table = TableBlock::new(&["Column", "Outliers Count"]);
        table.push_row(vec!["age".to_string(), "3".to_string()]);
        let rendered = render_table(&table);
        assert!(rendered.contains("Outliers Count"));
        assert!(rendered.contains("age"));
    }

    #[test]
    fn test_marker_at_max_lands_in_last_bin() {
        let line = |label: &str, value: f64| crate::report::chart::ReferenceLine {
            label: label.to_string(),
            value,
            style: LineStyle::Dash,
        };
        let hist = Histogram::from_values(
            "age",
            "age",
            &[0.0, 5.0, 10.0],
            2,
            vec![line("Max", 10.0), line("Mid", 5.0), line("Min", 0.0)],
        );

        assert_eq!(bin_markers(&hist, 0), vec!["┆ Min".to_string()]);
        assert_eq!(
            bin_markers(&hist, 1),
            vec!["┆ Max".to_string(), "┆ Mid".to_string()]
        );
    }

    #[test]
    fn test_marker_on_constant_column() {
        let hist = Histogram::from_values(
            "x",
            "x",
            &[4.0, 4.0],
            30,
            vec![crate::report::chart::ReferenceLine {
                label: "Mean".to_string(),
                value: 4.0,
                style: LineStyle::Dot,
            }],
        );
        assert_eq!(bin_markers(&hist, 0), vec!["┊ Mean".to_string()]);
    }

    #[test]
    fn test_scale_color_palette_cycles() {
        assert_eq!(scale_color(ColorScale::Palette, 0.0, 0.0, 0.0, 0), Color::Green);
        assert_eq!(scale_color(ColorScale::Palette, 0.0, 0.0, 0.0, 3), Color::Green);
        assert_eq!(scale_color(ColorScale::Viridis, 1.0, 0.0, 1.0, 0), Color::Yellow);
    }
}
