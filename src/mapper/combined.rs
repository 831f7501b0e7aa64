use crate::domain::{Submission, TemplateId};
use crate::instance::{Characteristic, CombinedSample, CombinedSeries, GeoInstance, InstanceHeader, Leaf};

/// One instance per submission with the samples nested under the series. Samples
/// contribute their flat characteristics, not the per-channel ones.
pub fn map_combined(submission: &Submission, template_id: &TemplateId) -> GeoInstance {
    let samples = submission
        .samples
        .values()
        .map(|sample| CombinedSample {
            sample_id: Leaf::new(&sample.gsm),
            characteristics: sample
                .characteristics
                .iter()
                .map(|(tag, value)| Characteristic::new(tag, value))
                .collect(),
        })
        .collect();

    GeoInstance {
        header: InstanceHeader::new(template_id, &submission.gse),
        series: CombinedSeries {
            series_id: Leaf::new(&submission.series.gse),
            title: Leaf::new(&submission.series.title),
            samples,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::{PerChannelInfo, Sample, Series};

    #[test]
    fn nests_samples_with_flat_characteristics() {
        let mut flat = BTreeMap::new();
        flat.insert("cell type".to_string(), "hepatocyte".to_string());
        let mut per_channel = BTreeMap::new();
        per_channel.insert(
            1,
            PerChannelInfo {
                channel: 1,
                source_name: "liver".to_string(),
                organism: "Homo sapiens".to_string(),
                molecule: "total RNA".to_string(),
                label: "biotin".to_string(),
                characteristics: BTreeMap::from([(
                    "channel only".to_string(),
                    "ignored".to_string(),
                )]),
            },
        );
        let sample = Sample {
            gsm: "GSM5".to_string(),
            gpl: "GPL1".to_string(),
            title: "t".to_string(),
            description: None,
            organisms: vec!["Homo sapiens".to_string()],
            molecules: Vec::new(),
            per_channel,
            characteristics: flat,
        };
        let submission = Submission {
            gse: "GSE9".to_string(),
            series: Series {
                gse: "GSE9".to_string(),
                title: "Series nine".to_string(),
                summary: Vec::new(),
                overall_design: Vec::new(),
                pubmed_ids: Vec::new(),
            },
            samples: BTreeMap::from([("GSM5".to_string(), sample)]),
            platforms: Vec::new(),
        };
        let template: TemplateId = "https://repo.metadatacenter.org/templates/geo".parse().unwrap();

        let instance = map_combined(&submission, &template);
        assert_eq!(instance.header.name, "GSE9");
        assert_eq!(instance.series.title.as_deref(), Some("Series nine"));
        assert_eq!(instance.series.samples.len(), 1);
        assert_eq!(
            instance.series.samples[0].characteristics,
            vec![Characteristic::new("cell type", "hepatocyte")]
        );
    }
}
