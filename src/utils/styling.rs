//! Terminal styling utilities for the report output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::DatasetStats;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ERROR: Emoji<'_, '_> = Emoji("❌ ", "[x] ");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗██████╗  █████╗ ██╗     ███████╗███╗   ██╗███████╗
    ██╔════╝██╔══██╗██╔══██╗██║     ██╔════╝████╗  ██║██╔════╝
    █████╗  ██║  ██║███████║██║     █████╗  ██╔██╗ ██║███████╗
    ██╔══╝  ██║  ██║██╔══██║██║     ██╔══╝  ██║╚██╗██║╚════██║
    ███████╗██████╔╝██║  ██║███████╗███████╗██║ ╚████║███████║
    ╚══════╝╚═════╝ ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Exploratory data analysis at a glance").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the input configuration card
pub fn print_config(train: &Path, test: &Path, target: &str) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Train:  {:<39}│",
        FOLDER,
        truncate_path(train, 38)
    );
    println!(
        "    │  {} Test:   {:<39}│",
        FOLDER,
        truncate_path(test, 38)
    );
    println!(
        "    │  {} Target: {:<39}│",
        TARGET,
        truncate_string(target, 38)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print shape and memory of the merged dataset
pub fn print_dataset_stats(stats: &DatasetStats) {
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", stats.rows);
    println!("      Columns: {}", stats.columns);
    println!("      Estimated memory: {:.2} MB", stats.memory_mb);
}

/// Print a top-level section header
pub fn print_section_header(title: &str) {
    println!();
    println!(
        "    {} {} {}",
        CHART,
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("═".repeat(50)).dim());
}

/// Print a nested section header
pub fn print_subsection_header(title: &str) {
    println!();
    println!("    {}", style(title).cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning to stderr
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", WARNING, style(message).yellow());
}

/// Print a fatal error to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", ERROR, style(message).red().bold());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Edalens report complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

/// Keep the tail of a string, prefixed with "..." when cut
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let tail: String = chars[chars.len() - keep..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a/very/long/path.csv", 10), "...ath.csv");
        assert_eq!(truncate_string("ééééé", 4), "...é");
    }
}
