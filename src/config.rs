//! Run settings for the three ingest modes, built from the parsed positional
//! arguments.

use camino::Utf8PathBuf;

use crate::domain::SeriesRange;

#[derive(Debug, Clone)]
pub struct BioSampleRun {
    pub metadb: Utf8PathBuf,
    pub range: SeriesRange,
    pub template: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
}

#[derive(Debug, Clone)]
pub struct CedarRun {
    pub metadb: Utf8PathBuf,
    pub range: SeriesRange,
    pub templates: CedarPaths,
    pub output_dirs: CedarPaths,
}

/// One path per GEO entity kind.
#[derive(Debug, Clone)]
pub struct CedarPaths {
    pub series: Utf8PathBuf,
    pub sample: Utf8PathBuf,
    pub platform: Utf8PathBuf,
}

#[derive(Debug, Clone)]
pub struct CombinedRun {
    pub metadb: Utf8PathBuf,
    pub range: SeriesRange,
    pub template: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
}
