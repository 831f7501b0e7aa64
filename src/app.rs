use serde::Serialize;
use tracing::{debug, info};

use crate::config::{BioSampleRun, CedarRun, CombinedRun};
use crate::domain::TemplateId;
use crate::error::IngestError;
use crate::mapper::{HUMAN, map_biosample, map_combined, map_platform, map_sample, map_series};
use crate::metadb::MetadataSource;
use crate::output::InstanceWriter;
use crate::template::resolve_template_id;

/// Counts for one run, printed when it finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub submissions: usize,
    pub series_written: usize,
    pub samples_written: usize,
    pub platforms_written: usize,
    pub biosamples_written: usize,
    pub instances_written: usize,
    pub skipped_non_human: usize,
    pub skipped_incomplete: usize,
}

#[derive(Debug, Clone)]
pub struct CedarTemplates {
    pub series: TemplateId,
    pub sample: TemplateId,
    pub platform: TemplateId,
}

pub struct Ingestor<S: MetadataSource> {
    source: S,
}

impl<S: MetadataSource> Ingestor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Writes a BioSample instance for every human sample whose channel 1 names
    /// both a tissue and a disease.
    pub fn biosample(&self, run: &BioSampleRun) -> Result<IngestReport, IngestError> {
        let submissions = self.source.extract_submissions(run.range)?;
        let template_id = resolve_template_id(&run.template)?;
        let writer = InstanceWriter::new(&run.output_dir)?;

        let mut report = IngestReport {
            submissions: submissions.len(),
            ..IngestReport::default()
        };
        for submission in &submissions {
            for sample in submission.samples.values() {
                if !sample.has_organism(HUMAN) {
                    report.skipped_non_human += 1;
                    continue;
                }
                let mapping = map_biosample(sample, &template_id)?;
                if !mapping.should_write() {
                    debug!(
                        "skipping {}: tissue found={}, disease found={}",
                        sample.gsm, mapping.tissue_found, mapping.disease_found
                    );
                    report.skipped_incomplete += 1;
                    continue;
                }
                writer.write(&mapping.instance)?;
                report.biosamples_written += 1;
            }
        }
        info!(
            "wrote {} BioSample instances to {}",
            report.biosamples_written,
            writer.dir()
        );
        Ok(report)
    }

    /// Writes one instance per series, sample and platform.
    pub fn cedar(&self, run: &CedarRun) -> Result<IngestReport, IngestError> {
        let submissions = self.source.extract_submissions(run.range)?;
        let templates = CedarTemplates {
            series: resolve_template_id(&run.templates.series)?,
            sample: resolve_template_id(&run.templates.sample)?,
            platform: resolve_template_id(&run.templates.platform)?,
        };
        let series_writer = InstanceWriter::new(&run.output_dirs.series)?;
        let sample_writer = InstanceWriter::new(&run.output_dirs.sample)?;
        let platform_writer = InstanceWriter::new(&run.output_dirs.platform)?;

        let mut report = IngestReport {
            submissions: submissions.len(),
            ..IngestReport::default()
        };
        for submission in &submissions {
            series_writer.write(&map_series(submission, &templates.series))?;
            report.series_written += 1;

            for sample in submission.samples.values() {
                sample_writer.write(&map_sample(sample, &templates.sample))?;
                report.samples_written += 1;
            }

            for platform in &submission.platforms {
                platform_writer.write(&map_platform(platform, &templates.platform))?;
                report.platforms_written += 1;
            }
        }
        info!(
            "wrote {} series, {} samples, {} platforms",
            report.series_written, report.samples_written, report.platforms_written
        );
        Ok(report)
    }

    /// Writes one combined series-with-samples instance per submission.
    pub fn combined(&self, run: &CombinedRun) -> Result<IngestReport, IngestError> {
        let submissions = self.source.extract_submissions(run.range)?;
        let template_id = resolve_template_id(&run.template)?;
        let writer = InstanceWriter::new(&run.output_dir)?;

        let mut report = IngestReport {
            submissions: submissions.len(),
            ..IngestReport::default()
        };
        for submission in &submissions {
            writer.write(&map_combined(submission, &template_id))?;
            report.instances_written += 1;
        }
        info!(
            "wrote {} GEO instances to {}",
            report.instances_written,
            writer.dir()
        );
        Ok(report)
    }
}
