//! `matlab_check` binary entry point.
//! Scans a tree, prints the report, and exits with the failing-file count.

use clap::Parser;
use matlab_style::cli::CheckCli;
use matlab_style::config::{self, OutputMode};
use matlab_style::output;
use matlab_style::rules::RuleSet;
use matlab_style::scanner;
use matlab_style::utils;
use std::path::Path;
use tracing::debug;

fn main() {
    let cli = CheckCli::parse();
    utils::init_tracing();

    let eff = config::resolve_effective(
        &cli.root_dir,
        cli.output,
        if cli.verbose { Some(true) } else { None },
    );
    if let Some(dir) = eff.config_root.as_ref() {
        if eff.output == OutputMode::Human {
            eprintln!(
                "{} using config from {}",
                utils::note_prefix(),
                dir.display()
            );
        }
    }

    let rules = RuleSet::default();
    debug!(rules = rules.rules().len(), "rule set ready");
    let results = match scanner::scan(&cli.root_dir, &rules) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };

    let code = output::print_check(&results, eff.output);
    if eff.verbose {
        let log = Path::new(output::LOG_FILE);
        match eff.output {
            OutputMode::Json => output::report_log(&results, log, &mut std::io::stderr()),
            OutputMode::Human => output::report_log(&results, log, &mut std::io::stdout()),
        }
    }
    std::process::exit(code);
}
