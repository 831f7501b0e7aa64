//! CEDAR template instance shapes.
//!
//! Field names follow the JSON properties of the corresponding CEDAR templates.
//! Every field is always serialized; absent values come out as `null`.

use serde::{Deserialize, Serialize};

use crate::domain::TemplateId;

/// A template field holding one scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    #[serde(rename = "@value")]
    pub value: Option<String>,
}

impl Leaf {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Fields every instance carries, tying it back to its template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceHeader {
    #[serde(rename = "schema:isBasedOn")]
    pub is_based_on: TemplateId,
    #[serde(rename = "schema:name")]
    pub name: String,
    #[serde(rename = "schema:description")]
    pub description: String,
}

impl InstanceHeader {
    pub fn new(template_id: &TemplateId, accession: &str) -> Self {
        Self {
            is_based_on: template_id.clone(),
            name: accession.to_string(),
            description: format!("{accession} created by CEDAR's GEO Ingestor"),
        }
    }
}

/// Something with a natural accession that can be written as `<accession>.json`.
pub trait Instance: Serialize {
    fn accession(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalAttribute {
    pub name: Leaf,
    pub value: Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioSampleInstance {
    #[serde(flatten)]
    pub header: InstanceHeader,
    pub sample_name: Leaf,
    pub isolate: Leaf,
    pub biomaterial_provider: Leaf,
    pub organism: Leaf,
    pub tissue: Option<Leaf>,
    pub age: Option<Leaf>,
    pub sex: Option<Leaf>,
    pub optional_attribute: Vec<OptionalAttribute>,
}

impl BioSampleInstance {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.optional_attribute
            .iter()
            .find(|attr| attr.name.as_deref() == Some(name))
            .and_then(|attr| attr.value.as_deref())
    }
}

impl Instance for BioSampleInstance {
    fn accession(&self) -> &str {
        &self.header.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoSeriesInstance {
    #[serde(flatten)]
    pub header: InstanceHeader,
    #[serde(rename = "seriesID")]
    pub series_id: Leaf,
    pub series_title: Leaf,
    pub series_summary: Leaf,
    pub series_overall_design: Leaf,
    #[serde(rename = "pubMedID")]
    pub pubmed_id: Vec<Leaf>,
    #[serde(rename = "sampleIDs")]
    pub sample_ids: Vec<Leaf>,
}

impl Instance for GeoSeriesInstance {
    fn accession(&self) -> &str {
        &self.header.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    pub tag: Leaf,
    pub value: Leaf,
}

impl Characteristic {
    pub fn new(tag: &str, value: &str) -> Self {
        Self {
            tag: Leaf::new(tag),
            value: Leaf::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub channel_number: Leaf,
    pub source_name: Leaf,
    pub organism: Leaf,
    pub molecule: Leaf,
    pub label: Leaf,
    pub characteristics: Vec<Characteristic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoSampleInstance {
    #[serde(flatten)]
    pub header: InstanceHeader,
    #[serde(rename = "sampleID")]
    pub sample_id: Leaf,
    pub title: Leaf,
    pub description: Option<Leaf>,
    #[serde(rename = "platformID")]
    pub platform_id: Leaf,
    pub per_channel_sample_info: Vec<ChannelInfo>,
}

impl Instance for GeoSampleInstance {
    fn accession(&self) -> &str {
        &self.header.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPlatformInstance {
    #[serde(flatten)]
    pub header: InstanceHeader,
    #[serde(rename = "platformID")]
    pub platform_id: Leaf,
    pub title: Leaf,
    pub organism: Leaf,
    pub distribution: Leaf,
    pub manufacturer: Option<Leaf>,
}

impl Instance for GeoPlatformInstance {
    fn accession(&self) -> &str {
        &self.header.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSample {
    #[serde(rename = "sampleID")]
    pub sample_id: Leaf,
    pub characteristics: Vec<Characteristic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSeries {
    #[serde(rename = "seriesID")]
    pub series_id: Leaf,
    pub title: Leaf,
    pub samples: Vec<CombinedSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInstance {
    #[serde(flatten)]
    pub header: InstanceHeader,
    pub series: CombinedSeries,
}

impl Instance for GeoInstance {
    fn accession(&self) -> &str {
        &self.header.name
    }
}
