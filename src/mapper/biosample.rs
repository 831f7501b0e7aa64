use crate::classify::{Classification, classify};
use crate::domain::{Sample, TemplateId};
use crate::error::IngestError;
use crate::instance::{BioSampleInstance, InstanceHeader, Leaf, OptionalAttribute};

pub const HUMAN: &str = "homo sapiens";

/// The only channel BioSample mapping reads. Samples without it are an error.
pub const BIOSAMPLE_CHANNEL: u32 = 1;

const BIOMATERIAL_PROVIDER: &str = "Biomaterial Provider";

/// A mapped BioSample together with what classification found.
#[derive(Debug, Clone)]
pub struct BioSampleMapping {
    pub instance: BioSampleInstance,
    pub tissue_found: bool,
    pub disease_found: bool,
}

impl BioSampleMapping {
    /// Written only when both a tissue and a disease were classified.
    pub fn should_write(&self) -> bool {
        self.tissue_found && self.disease_found
    }
}

pub fn map_biosample(
    sample: &Sample,
    template_id: &TemplateId,
) -> Result<BioSampleMapping, IngestError> {
    let channel = sample
        .per_channel
        .get(&BIOSAMPLE_CHANNEL)
        .ok_or_else(|| IngestError::MissingChannel {
            gsm: sample.gsm.clone(),
            channel: BIOSAMPLE_CHANNEL,
        })?;

    let Classification {
        tissue,
        age,
        sex,
        attributes,
        tissue_found,
        disease_found,
    } = classify(&channel.characteristics);

    let mut optional_attribute = attributes
        .into_iter()
        .map(|attr| attribute(&attr.name, &attr.value))
        .collect::<Vec<_>>();
    optional_attribute.push(attribute("sample title", &sample.title));
    if let Some(description) = &sample.description {
        optional_attribute.push(attribute("description", description));
    }

    let instance = BioSampleInstance {
        header: InstanceHeader::new(template_id, &sample.gsm),
        sample_name: Leaf::new(&sample.gsm),
        isolate: Leaf::new(&sample.gsm),
        biomaterial_provider: Leaf::new(BIOMATERIAL_PROVIDER),
        organism: Leaf::new(&channel.organism),
        tissue: tissue.map(Leaf::new),
        age: age.map(Leaf::new),
        sex: sex.map(Leaf::new),
        optional_attribute,
    };

    Ok(BioSampleMapping {
        instance,
        tissue_found,
        disease_found,
    })
}

fn attribute(name: &str, value: &str) -> OptionalAttribute {
    OptionalAttribute {
        name: Leaf::new(name),
        value: Leaf::new(value),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_matches::assert_matches;

    use super::*;
    use crate::domain::PerChannelInfo;

    fn template() -> TemplateId {
        "https://repo.metadatacenter.org/templates/biosample".parse().unwrap()
    }

    fn sample(channel: u32, chars: &[(&str, &str)]) -> Sample {
        let characteristics = chars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>();
        let mut per_channel = BTreeMap::new();
        per_channel.insert(
            channel,
            PerChannelInfo {
                channel,
                source_name: "liver biopsy".to_string(),
                organism: "Homo sapiens".to_string(),
                molecule: "total RNA".to_string(),
                label: "biotin".to_string(),
                characteristics: characteristics.clone(),
            },
        );
        Sample {
            gsm: "GSM1".to_string(),
            gpl: "GPL570".to_string(),
            title: "Liver tumor, patient 1".to_string(),
            description: Some("resected tissue".to_string()),
            organisms: vec!["Homo sapiens".to_string()],
            molecules: vec!["total RNA".to_string()],
            per_channel,
            characteristics,
        }
    }

    #[test]
    fn maps_accepted_sample() {
        let sample = sample(1, &[("Tissue", "liver"), ("disease state", "cancer"), ("Sex", "F")]);
        let mapping = map_biosample(&sample, &template()).unwrap();
        assert!(mapping.should_write());

        let instance = mapping.instance;
        assert_eq!(instance.header.name, "GSM1");
        assert_eq!(instance.header.is_based_on, template());
        assert_eq!(instance.sample_name.as_deref(), Some("GSM1"));
        assert_eq!(instance.isolate.as_deref(), Some("GSM1"));
        assert_eq!(instance.biomaterial_provider.as_deref(), Some("Biomaterial Provider"));
        assert_eq!(instance.organism.as_deref(), Some("Homo sapiens"));
        assert_eq!(instance.tissue, Some(Leaf::new("liver")));
        assert_eq!(instance.sex, Some(Leaf::new("F")));
        assert_eq!(instance.age, None);
        assert_eq!(instance.attribute("disease"), Some("cancer"));
        assert_eq!(instance.attribute("sample title"), Some("Liver tumor, patient 1"));
        assert_eq!(instance.attribute("description"), Some("resected tissue"));

        let names = instance
            .optional_attribute
            .iter()
            .filter_map(|attr| attr.name.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["disease", "sample title", "description"]);
    }

    #[test]
    fn gate_closed_without_disease() {
        let sample = sample(1, &[("Tissue", "liver")]);
        let mapping = map_biosample(&sample, &template()).unwrap();
        assert!(mapping.tissue_found);
        assert!(!mapping.should_write());
        assert_eq!(mapping.instance.attribute("sample title"), Some("Liver tumor, patient 1"));
    }

    #[test]
    fn gate_closed_without_tissue() {
        let sample = sample(1, &[("disease state", "cancer")]);
        let mapping = map_biosample(&sample, &template()).unwrap();
        assert!(mapping.disease_found);
        assert!(!mapping.tissue_found);
        assert!(!mapping.should_write());
    }

    #[test]
    fn missing_channel_one_is_an_error() {
        let sample = sample(2, &[("Tissue", "liver"), ("disease", "cancer")]);
        let err = map_biosample(&sample, &template()).unwrap_err();
        assert_matches!(err, IngestError::MissingChannel { channel: 1, .. });
    }
}
