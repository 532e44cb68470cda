//! Shared data models for check results and the reporter.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One file scheduled for checking.
pub struct Task {
    pub path: PathBuf,
    pub file_name: String,
    pub dir: PathBuf,
    pub rel_dir: PathBuf,
    pub root_name: String,
    pub root: PathBuf,
}

impl Task {
    /// Build a task for `path` found under the absolute `root`.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let rel_dir = pathdiff::diff_paths(&dir, root).unwrap_or_default();
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Task {
            path,
            file_name,
            dir,
            rel_dir,
            root_name,
            root: root.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Inclusive 1-based line range.
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn line(n: usize) -> Self {
        LineSpan { start: n, end: n }
    }

    pub fn range(start: usize, end: usize) -> Self {
        LineSpan { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single rule violation.
pub struct Diagnostic {
    pub rule: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<LineSpan>,
    pub message: String,
}

impl Diagnostic {
    pub fn at_line(rule: &'static str, line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            rule,
            span: Some(LineSpan::line(line)),
            message: message.into(),
        }
    }

    pub fn at_lines(
        rule: &'static str,
        start: usize,
        end: usize,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            rule,
            span: Some(LineSpan::range(start, end)),
            message: message.into(),
        }
    }

    /// Whole-file diagnostic, used when the file could not be read.
    pub fn file_level(rule: &'static str, message: impl Into<String>) -> Self {
        Diagnostic {
            rule,
            span: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(s) if s.start == s.end => write!(f, "Line {}: {}", s.start, self.message),
            Some(s) => write!(f, "Lines {}-{}: {}", s.start, s.end, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone)]
/// Diagnostics collected for one task. `passed` is derived, never stored.
pub struct CheckResult {
    pub task: Task,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn new(task: Task, diagnostics: Vec<Diagnostic>) -> Self {
        CheckResult { task, diagnostics }
    }

    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn file(&self) -> String {
        self.task.path.to_string_lossy().to_string()
    }

    /// Rendered messages, in rule registration order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Pass/fail counts over a run.
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub files: usize,
}

impl RunSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        RunSummary {
            passed,
            failed: results.len() - passed,
            files: results.len(),
        }
    }
}

#[derive(Debug, Serialize)]
/// One line of `matlab_check.log`.
pub struct LogRecord {
    pub file: String,
    pub messages: Vec<String>,
    pub status: bool,
}

impl From<&CheckResult> for LogRecord {
    fn from(r: &CheckResult) -> Self {
        LogRecord {
            file: r.file(),
            messages: r.messages(),
            status: r.passed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fields_from_root() {
        let root = Path::new("/work/project");
        let task = Task::new(root, PathBuf::from("/work/project/lib/util/f.m"));
        assert_eq!(task.file_name, "f.m");
        assert_eq!(task.dir, PathBuf::from("/work/project/lib/util"));
        assert_eq!(task.rel_dir, PathBuf::from("lib/util"));
        assert_eq!(task.root_name, "project");
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::at_line("r", 3, "bad");
        assert_eq!(d.to_string(), "Line 3: bad");
        let d = Diagnostic::at_lines("r", 2, 4, "3 consecutive empty lines.");
        assert_eq!(d.to_string(), "Lines 2-4: 3 consecutive empty lines.");
        let d = Diagnostic::file_level("r", "Error reading file x");
        assert_eq!(d.to_string(), "Error reading file x");
    }

    #[test]
    fn test_passed_follows_diagnostics() {
        let task = Task::new(Path::new("/r"), PathBuf::from("/r/a.m"));
        let ok = CheckResult::new(task.clone(), Vec::new());
        let bad = CheckResult::new(task, vec![Diagnostic::at_line("r", 1, "x")]);
        assert!(ok.passed());
        assert!(!bad.passed());
        let summary = RunSummary::from_results(&[ok, bad]);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.files, 2);
    }
}
