//! CLI argument parsing via `clap`.

use crate::config::OutputMode;
use crate::error::{Result, StyleError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "matlab_check",
    version,
    about = "MATLAB code style checker",
    long_about = "Check every .m file under a directory for blank-line runs, double quotes, non-ASCII text and forbidden keywords.\n\nExit code is the number of failing files.\n\nConfiguration precedence: CLI > matlab_style.toml > defaults.",
    after_help = "Examples:\n  matlab_check src\n  matlab_check . --verbose\n  matlab_check . --output json"
)]
/// Options for the checker binary.
pub struct CheckCli {
    #[arg(help = "Root directory to search for .m files")]
    pub root_dir: PathBuf,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Write failing results to matlab_check.log")]
    pub verbose: bool,
    #[arg(long, value_enum, help = "Output mode (default: human)")]
    pub output: Option<OutputMode>,
}

#[derive(Parser)]
#[command(
    name = "matlab_format",
    version,
    about = "Format MATLAB code",
    long_about = "Normalize comma spacing in MATLAB sources. Without --force, line diffs are printed and no file is changed.",
    after_help = "Examples:\n  matlab_format --file src/f.m\n  matlab_format --dir src --force"
)]
/// Options for the formatter binary.
pub struct FormatCli {
    #[arg(long, conflicts_with = "dir", help = "Path to a single MATLAB file")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Directory to search for MATLAB files")]
    pub dir: Option<PathBuf>,
    #[arg(short = 'f', long, action = clap::ArgAction::SetTrue, help = "Overwrite the original file with formatted code")]
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a formatter run acts on.
pub struct FormatTarget {
    pub path: PathBuf,
    pub single: bool,
    pub force: bool,
}

impl FormatCli {
    /// Pick the file or directory to format. Overwriting follows `--force`
    /// alone.
    pub fn target(&self) -> Result<FormatTarget> {
        let (path, single) = match (&self.file, &self.dir) {
            (Some(f), _) => (f.clone(), true),
            (None, Some(d)) => (d.clone(), false),
            (None, None) => return Err(StyleError::MissingTarget),
        };
        Ok(FormatTarget {
            path,
            single,
            force: self.force,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cli_parses_root_and_verbose() {
        let cli = CheckCli::try_parse_from(["matlab_check", "src", "--verbose"]).unwrap();
        assert_eq!(cli.root_dir, PathBuf::from("src"));
        assert!(cli.verbose);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_format_cli_short_force() {
        let cli = FormatCli::try_parse_from(["matlab_format", "--dir", "src", "-f"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("src")));
        assert!(cli.force);
    }

    #[test]
    fn test_format_cli_rejects_file_and_dir() {
        assert!(FormatCli::try_parse_from(["matlab_format", "--file", "a.m", "--dir", "src"]).is_err());
    }

    #[test]
    fn test_check_cli_output_value_enum() {
        let cli = CheckCli::try_parse_from(["matlab_check", ".", "--output", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputMode::Json));
        assert!(CheckCli::try_parse_from(["matlab_check", ".", "--output", "jsn"]).is_err());
    }

    #[test]
    fn test_format_target_requires_file_or_dir() {
        let cli = FormatCli::try_parse_from(["matlab_format"]).unwrap();
        let err = cli.target().unwrap_err();
        assert!(matches!(err, StyleError::MissingTarget));
        assert_eq!(err.to_string(), "You must specify either --file or --dir");
    }

    #[test]
    fn test_format_target_file_and_dir() {
        let cli = FormatCli::try_parse_from(["matlab_format", "--file", "a.m"]).unwrap();
        assert_eq!(
            cli.target().unwrap(),
            FormatTarget { path: PathBuf::from("a.m"), single: true, force: false }
        );
        let cli = FormatCli::try_parse_from(["matlab_format", "--dir", "src", "--force"]).unwrap();
        let t = cli.target().unwrap();
        assert!(!t.single);
        assert!(t.force);
    }

    #[test]
    fn test_config_file_never_enables_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("matlab_style.toml"), "[format]\nforce = true\n").unwrap();
        let file = root.join("f.m");
        std::fs::write(&file, "f(a,b)\n").unwrap();

        let cli = FormatCli::try_parse_from(["matlab_format", "--file", file.to_str().unwrap()])
            .unwrap();
        let target = cli.target().unwrap();
        assert!(!target.force);
        let res = crate::format::format_file(&target.path, target.force).unwrap();
        assert!(!res.wrote);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "f(a,b)\n");
    }
}
