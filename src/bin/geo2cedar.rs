use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;

use geo_ingestor::app::Ingestor;
use geo_ingestor::cli::{finish, init_tracing, parse_args};
use geo_ingestor::config::{CedarPaths, CedarRun};
use geo_ingestor::domain::SeriesRange;
use geo_ingestor::metadb::GeoMetadb;
use geo_ingestor::output::print_json;

const PROGRAM: &str = "geo2cedar";

#[derive(Parser)]
#[command(name = PROGRAM)]
#[command(about = "Write GEO series, sample and platform instances from a GEOmetadb snapshot")]
#[command(version)]
struct Cli {
    metadb: Utf8PathBuf,
    start_index: usize,
    series_count: usize,
    series_template: Utf8PathBuf,
    sample_template: Utf8PathBuf,
    platform_template: Utf8PathBuf,
    series_output_dir: Utf8PathBuf,
    sample_output_dir: Utf8PathBuf,
    platform_output_dir: Utf8PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    match parse_args::<Cli>(PROGRAM) {
        Ok(cli) => finish(PROGRAM, run(cli)),
        Err(code) => code,
    }
}

fn run(cli: Cli) -> miette::Result<()> {
    let run = CedarRun {
        metadb: cli.metadb,
        range: SeriesRange {
            start: cli.start_index,
            count: cli.series_count,
        },
        templates: CedarPaths {
            series: cli.series_template,
            sample: cli.sample_template,
            platform: cli.platform_template,
        },
        output_dirs: CedarPaths {
            series: cli.series_output_dir,
            sample: cli.sample_output_dir,
            platform: cli.platform_output_dir,
        },
    };

    let source = GeoMetadb::open(&run.metadb)?;
    let report = Ingestor::new(source).cedar(&run)?;
    print_json(&report).into_diagnostic()?;
    Ok(())
}
