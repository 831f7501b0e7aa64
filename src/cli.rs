//! Process plumbing shared by the binaries.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::IngestError;

const USAGE_EXIT_CODE: u8 = 2;

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parses the command line. Usage errors go to stderr under the program name
/// with exit status 2; `--help` and `--version` print as usual and exit 0.
pub fn parse_args<P: Parser>(program: &str) -> Result<P, ExitCode> {
    P::try_parse().map_err(|err| {
        if !err.use_stderr() {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        eprintln!("{program}: {}", err.to_string().trim_end());
        ExitCode::from(USAGE_EXIT_CODE)
    })
}

/// Reports a failed run on stderr, prefixed with the program name, and picks the
/// exit status.
pub fn finish(program: &str, result: miette::Result<()>) -> ExitCode {
    let Err(report) = result else {
        return ExitCode::SUCCESS;
    };
    eprintln!("{program}: {report:?}");
    match report.downcast_ref::<IngestError>() {
        Some(err) => ExitCode::from(err.exit_code()),
        None => ExitCode::from(1),
    }
}
