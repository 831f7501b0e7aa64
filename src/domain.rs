//! Submission metadata as read from GEOmetadb.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub gse: String,
    pub series: Series,
    /// Samples keyed by sample name (the GSM accession).
    #[serde(default)]
    pub samples: BTreeMap<String, Sample>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub gse: String,
    pub title: String,
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub overall_design: Vec<String>,
    #[serde(default)]
    pub pubmed_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub gsm: String,
    pub gpl: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organisms: Vec<String>,
    #[serde(default)]
    pub molecules: Vec<String>,
    #[serde(default)]
    pub per_channel: BTreeMap<u32, PerChannelInfo>,
    #[serde(default)]
    pub characteristics: BTreeMap<String, String>,
}

impl Sample {
    pub fn has_organism(&self, organism: &str) -> bool {
        self.organisms
            .iter()
            .any(|name| name.eq_ignore_ascii_case(organism))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerChannelInfo {
    pub channel: u32,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub organism: String,
    #[serde(default)]
    pub molecule: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub characteristics: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub gpl: String,
    pub title: String,
    #[serde(default)]
    pub organism: String,
    #[serde(default)]
    pub distribution: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// Half-open window over the series table: `count` series starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesRange {
    pub start: usize,
    pub count: usize,
}

/// The `@id` declared by a CEDAR template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = IngestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IngestError::InvalidArgument(
                "template id must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample_with_organisms(organisms: &[&str]) -> Sample {
        Sample {
            gsm: "GSM1".to_string(),
            gpl: "GPL1".to_string(),
            title: "title".to_string(),
            description: None,
            organisms: organisms.iter().map(|s| s.to_string()).collect(),
            molecules: Vec::new(),
            per_channel: BTreeMap::new(),
            characteristics: BTreeMap::new(),
        }
    }

    #[test]
    fn organism_match_ignores_case() {
        let sample = sample_with_organisms(&["Mus musculus", "HOMO SAPIENS"]);
        assert!(sample.has_organism("homo sapiens"));
        assert!(!sample_with_organisms(&["Homo sapiens neanderthalensis"]).has_organism("homo sapiens"));
    }

    #[test]
    fn parse_template_id() {
        let id: TemplateId = " https://repo.metadatacenter.org/templates/abc ".parse().unwrap();
        assert_eq!(id.as_str(), "https://repo.metadatacenter.org/templates/abc");

        let err = "  ".parse::<TemplateId>().unwrap_err();
        assert_matches!(err, IngestError::InvalidArgument(_));
    }
}
