//! CLI entry point for shears

use std::env;
use std::io::IsTerminal;
use std::process;

use clap::{Parser, ValueEnum};
use shears::{FileSummary, Reporter, RunSummary, Workspace, print_json, rewrite, scanner};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "shears")]
#[command(about = "Strip the comments your last commit grew")]
#[command(version)]
struct Args {
    /// Detect and report comments without modifying any file
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Print a JSON summary instead of step-by-step output
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();
    let use_color = should_use_color(args.color);
    let mut reporter = Reporter::new(use_color);

    match run(&args, &mut reporter) {
        Ok(code) => process::exit(code),
        Err(e) => {
            let _ = reporter.error(&e.to_string());
            process::exit(1);
        }
    }
}

fn run(args: &Args, reporter: &mut Reporter) -> Result<i32, Box<dyn std::error::Error>> {
    let narrate = !args.json;

    if narrate {
        reporter.step("Validating repository state...")?;
    }
    let workspace = Workspace::open_at_root(&env::current_dir()?)?;
    workspace.ensure_clean()?;
    if narrate {
        reporter.success("Repository validation passed")?;
        reporter.detail(&format!("repository root: {}", workspace.root().display()))?;
        reporter.step("Extracting HEAD commit diff...")?;
    }

    let diff_text = workspace.head_diff()?;
    if diff_text.is_empty() {
        if args.json {
            print_json(&RunSummary::empty(args.dry_run))?;
        } else {
            reporter.info("No changes found in HEAD commit")?;
        }
        return Ok(0);
    }

    if narrate {
        reporter.step("Scanning added lines for comments...")?;
    }
    let occurrences_by_file = scanner::scan(&diff_text)?;
    if occurrences_by_file.is_empty() {
        if args.json {
            print_json(&RunSummary::empty(args.dry_run))?;
        } else {
            reporter.info("No comments detected in the changes")?;
        }
        return Ok(0);
    }

    let total_detected: usize = occurrences_by_file.values().map(Vec::len).sum();
    if narrate {
        reporter.success(&format!(
            "Found {} comment line(s) across {} file(s)",
            total_detected,
            occurrences_by_file.len()
        ))?;
        for (path, occurrences) in &occurrences_by_file {
            reporter.detail(&format!("{}: {} comment(s)", path, occurrences.len()))?;
        }
    }

    if args.dry_run {
        if args.json {
            let files = occurrences_by_file
                .iter()
                .map(|(path, occurrences)| FileSummary {
                    path: path.clone(),
                    detected: occurrences.len(),
                    changed: 0,
                })
                .collect();
            print_json(&RunSummary {
                files,
                total_detected,
                total_changed: 0,
                dry_run: true,
            })?;
        } else {
            reporter.info("Dry run: no files modified")?;
        }
        return Ok(0);
    }

    if narrate {
        reporter.step("Removing comments from files...")?;
    }
    let outcome = rewrite::apply(workspace.root(), &occurrences_by_file)?;
    for path in &outcome.missing {
        reporter.warn(&format!("file {path} does not exist, skipping"))?;
    }

    let total_changed: usize = outcome.changed.values().sum();
    if args.json {
        let files = occurrences_by_file
            .iter()
            .map(|(path, occurrences)| FileSummary {
                path: path.clone(),
                detected: occurrences.len(),
                changed: outcome.changed.get(path).copied().unwrap_or(0),
            })
            .collect();
        print_json(&RunSummary {
            files,
            total_detected,
            total_changed,
            dry_run: false,
        })?;
    } else {
        reporter.success(&format!("Removed {total_changed} comment line(s)"))?;
        for (path, count) in &outcome.changed {
            reporter.detail(&format!("{path}: {count} line(s) removed or truncated"))?;
        }
        reporter.info("Done. Files have been modified.")?;
        reporter.detail("review the changes with: git diff")?;
        reporter.detail("stage them with: git add <files>")?;
    }

    Ok(0)
}
