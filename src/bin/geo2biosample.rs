use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;

use geo_ingestor::app::Ingestor;
use geo_ingestor::cli::{finish, init_tracing, parse_args};
use geo_ingestor::config::BioSampleRun;
use geo_ingestor::domain::SeriesRange;
use geo_ingestor::metadb::GeoMetadb;
use geo_ingestor::output::print_json;

const PROGRAM: &str = "geo2biosample";

#[derive(Parser)]
#[command(name = PROGRAM)]
#[command(about = "Write BioSample instances for human GEO samples with tissue and disease annotations")]
#[command(version)]
struct Cli {
    metadb: Utf8PathBuf,
    start_index: usize,
    series_count: usize,
    biosample_template: Utf8PathBuf,
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
    let run = BioSampleRun {
        metadb: cli.metadb,
        range: SeriesRange {
            start: cli.start_index,
            count: cli.series_count,
        },
        template: cli.biosample_template,
        output_dir: cli.output_dir,
    };

    let source = GeoMetadb::open(&run.metadb)?;
    let report = Ingestor::new(source).biosample(&run)?;
    print_json(&report).into_diagnostic()?;
    Ok(())
}
