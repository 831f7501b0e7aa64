use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;

use geo_ingestor::app::Ingestor;
use geo_ingestor::cli::{finish, init_tracing, parse_args};
use geo_ingestor::config::CombinedRun;
use geo_ingestor::domain::SeriesRange;
use geo_ingestor::metadb::GeoMetadb;
use geo_ingestor::output::print_json;

const PROGRAM: &str = "geo2combined";

#[derive(Parser)]
#[command(name = PROGRAM)]
#[command(about = "Write one combined GEO instance per series, samples nested")]
#[command(version)]
struct Cli {
    metadb: Utf8PathBuf,
    start_index: usize,
    series_count: usize,
    geo_template: Utf8PathBuf,
    output_dir: Utf8PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    match parse_args::<Cli>(PROGRAM) {
        Ok(cli) => finish(PROGRAM, run(cli)),
        Err(code) => code,
    }
}

fn run(cli: Cli) -> miette::Result<()> {
    let run = CombinedRun {
        metadb: cli.metadb,
        range: SeriesRange {
            start: cli.start_index,
            count: cli.series_count,
        },
        template: cli.geo_template,
        output_dir: cli.output_dir,
    };

    let source = GeoMetadb::open(&run.metadb)?;
    let report = Ingestor::new(source).combined(&run)?;
    print_json(&report).into_diagnostic()?;
    Ok(())
}
