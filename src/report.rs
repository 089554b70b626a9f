//! Console and JSON reporting for the CLI
//!
//! Step-by-step narration goes to stdout with termcolor styling; warnings
//! and errors go to stderr. The `--json` mode swaps the narration for a
//! single machine-readable summary document.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Colored writer pair over stdout/stderr.
pub struct Reporter {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl Reporter {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    /// A bold heading for the phase about to run.
    pub fn step(&mut self, message: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        writeln!(self.stdout, "{message}")?;
        self.stdout.reset()
    }

    /// A completed-phase line.
    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(self.stdout, "{message}")?;
        self.stdout.reset()
    }

    /// Plain informational line.
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stdout, "{message}")
    }

    /// Indented detail under the preceding step or success line.
    pub fn detail(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stdout, "   {message}")
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(self.stderr, "warning: {message}")?;
        self.stderr.reset()
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(self.stderr, "error: ")?;
        self.stderr.reset()?;
        writeln!(self.stderr, "{message}")
    }
}

/// Per-file entry of the JSON summary.
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub path: String,
    /// Comment lines found on this file's added lines.
    pub detected: usize,
    /// Lines actually removed or truncated (0 in dry-run mode).
    pub changed: usize,
}

/// Machine-readable run summary printed by `--json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileSummary>,
    pub total_detected: usize,
    pub total_changed: usize,
    pub dry_run: bool,
}

impl RunSummary {
    /// An empty summary for runs that found nothing to do.
    pub fn empty(dry_run: bool) -> Self {
        Self {
            files: Vec::new(),
            total_detected: 0,
            total_changed: 0,
            dry_run,
        }
    }
}

/// Print the run summary as pretty-printed JSON to stdout.
pub fn print_json(summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes() {
        let summary = RunSummary {
            files: vec![FileSummary {
                path: "src/app.js".to_string(),
                detected: 3,
                changed: 3,
            }],
            total_detected: 3,
            total_changed: 3,
            dry_run: false,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"path\":\"src/app.js\""));
        assert!(json.contains("\"total_detected\":3"));
        assert!(json.contains("\"dry_run\":false"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::empty(true);
        assert!(summary.files.is_empty());
        assert!(summary.dry_run);
    }
}
