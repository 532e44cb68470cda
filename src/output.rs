//! Output rendering for the checker and the formatter.
//!
//! The checker supports `human` (default) and `json` outputs. Human output is
//! bounded to `SHOW_LIMIT` diagnostic lines across all files.

use crate::config::OutputMode;
use crate::error::Result;
use crate::format::{diff_lines, FormatResult};
use crate::models::{CheckResult, LogRecord, RunSummary};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Maximum diagnostic lines printed by the human checker output.
pub const SHOW_LIMIT: usize = 100;

/// Log file written in verbose mode, relative to the working directory.
pub const LOG_FILE: &str = "matlab_check.log";

const TOOL: &str = "matlab_check";

/// Process exit code for a run: the number of failing files.
pub fn exit_code(summary: &RunSummary) -> i32 {
    i32::try_from(summary.failed).unwrap_or(i32::MAX)
}

/// Print check results and return the exit code.
pub fn print_check(results: &[CheckResult], output: OutputMode) -> i32 {
    let summary = RunSummary::from_results(results);
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(&compose_check_json(results)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        OutputMode::Human => {
            let color = use_colors();
            for (i, line) in compose_check_lines(results).iter().enumerate() {
                if color && i == 0 {
                    if summary.failed == 0 {
                        println!("{}", line.green().bold());
                    } else {
                        println!("{}", line.red().bold());
                    }
                } else if color && line.starts_with("file: ") {
                    println!("{}", line.bold());
                } else {
                    println!("{}", line);
                }
            }
        }
    }
    exit_code(&summary)
}

/// Compose the human report lines (pure) for testing.
pub fn compose_check_lines(results: &[CheckResult]) -> Vec<String> {
    let summary = RunSummary::from_results(results);
    if summary.failed == 0 {
        return vec![format!("{}: pass", TOOL)];
    }
    let mut out = vec![
        format!("{}: [✓] {} [✗] {}", TOOL, summary.passed, summary.failed),
        "Failed files:".to_string(),
    ];
    let mut shown = 0usize;
    for r in results.iter().filter(|r| !r.passed()) {
        out.push(format!("file: {} errors: {}", r.file(), r.diagnostics.len()));
        for d in &r.diagnostics {
            out.push(d.to_string());
            shown += 1;
            if shown >= SHOW_LIMIT {
                out.push(String::new());
                out.push("Too many errors, truncated...".to_string());
                return out;
            }
        }
    }
    out
}

/// Compose check JSON object (pure) for testing purposes.
pub fn compose_check_json(results: &[CheckResult]) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file(),
                "passed": r.passed(),
                "diagnostics": r.diagnostics,
            })
        })
        .collect();
    json!({"results": items, "summary": RunSummary::from_results(results)})
}

/// Write failing results to `path` as JSON lines, replacing any old log.
/// Returns the number of records written.
pub fn write_log(results: &[CheckResult], path: &Path) -> Result<usize> {
    let mut f = fs::File::create(path)?;
    let mut n = 0;
    for r in results.iter().filter(|r| !r.passed()) {
        serde_json::to_writer(&mut f, &LogRecord::from(r))?;
        f.write_all(b"\n")?;
        n += 1;
    }
    Ok(n)
}

/// Write the verbose log and report the outcome to `status`. Never affects
/// the exit code. JSON runs pass stderr so stdout stays one JSON document.
pub fn report_log<W: Write>(results: &[CheckResult], path: &Path, status: &mut W) {
    let line = match write_log(results, path) {
        Ok(_) => format!("Check results written to {}", path.display()),
        Err(e) => format!("Error writing log: {}", e),
    };
    let _ = writeln!(status, "{}", line);
}

/// Compose the diff block for one file (pure), ending with a separator.
pub fn compose_diff(original: &str, formatted: &str) -> Vec<String> {
    let mut out = Vec::new();
    for c in diff_lines(original, formatted) {
        out.push(format!("Line {}:", c.line));
        out.push(format!("  [old]:{}", c.old));
        out.push(format!("  [new]:{}", c.new));
    }
    out.push("-".repeat(40));
    out
}

/// Print one formatter result.
///
/// `single` selects the single-file wording, which also reports files that
/// need no change. In directory mode unchanged files are silent.
pub fn print_format(r: &FormatResult, single: bool) {
    let color = use_colors();
    if r.wrote {
        if color {
            println!("{} {}", "Formatted and overwritten:".green().bold(), r.file);
        } else {
            println!("Formatted and overwritten: {}", r.file);
        }
        return;
    }
    if !r.changed {
        if single {
            println!("No changes needed for {}", r.file);
        }
        return;
    }
    if single {
        println!("Changes for file: {}", r.file);
    } else {
        println!("File: {}", r.file);
        println!("Changes:");
    }
    for line in compose_diff(&r.original, &r.formatted) {
        if color && line.starts_with("  [old]") {
            println!("{}", line.red());
        } else if color && line.starts_with("  [new]") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}
