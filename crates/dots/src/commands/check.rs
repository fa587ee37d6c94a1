use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::edges::{self, ParsedEdges};

/// Run the check command: parse an edge file and report every problem.
pub fn run(file: &Path, grid_size: usize) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let parsed = edges::parse(&text, grid_size);

    for line in report(&parsed) {
        println!("{line}");
    }

    if parsed.aborted() {
        anyhow::bail!(
            "{} cannot be drawn on a grid of size {grid_size}",
            file.display()
        );
    }
    Ok(())
}

fn report(parsed: &ParsedEdges) -> Vec<String> {
    let mut out: Vec<String> = parsed
        .errors
        .iter()
        .map(|e| {
            if e.aborts_pass() {
                e.to_string().red().to_string()
            } else {
                e.to_string().yellow().to_string()
            }
        })
        .collect();

    let summary = format!("{} edge(s), {} problem(s)", parsed.edges.len(), parsed.errors.len());
    out.push(if parsed.errors.is_empty() {
        summary.green().to_string()
    } else {
        summary
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_errors_then_summary() {
        colored::control::set_override(false);
        let parsed = edges::parse("0,0 1,1\n0,0 1,1 red", 2);
        let lines = report(&parsed);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Line 1:"));
        assert_eq!(lines[1], "1 edge(s), 1 problem(s)");
    }

    #[test]
    fn aborted_file_fails() {
        let dir = std::env::temp_dir().join(format!("dots-check-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("edges.txt");
        std::fs::write(&file, "0,0 5,5 red\n").unwrap();
        assert!(run(&file, 3).is_err());
        assert!(run(&file, 6).is_ok());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
