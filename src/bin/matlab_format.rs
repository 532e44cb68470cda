//! `matlab_format` binary entry point.
//! Normalizes comma spacing for one file or a directory tree.

use clap::Parser;
use matlab_style::cli::FormatCli;
use matlab_style::format;
use matlab_style::output;
use matlab_style::utils;

fn main() {
    let cli = FormatCli::parse();
    utils::init_tracing();

    let target = match cli.target() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let results = if target.single {
        vec![format::format_file(&target.path, target.force)]
    } else {
        format::format_directory(&target.path, target.force)
    };

    let mut failed = false;
    for res in results {
        match res {
            Ok(r) => output::print_format(&r, target.single),
            Err(e) => {
                eprintln!("{} {}", utils::error_prefix(), e);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}
