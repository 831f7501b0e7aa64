use crate::domain::{Platform, Sample, Submission, TemplateId};
use crate::instance::{
    ChannelInfo, Characteristic, GeoPlatformInstance, GeoSampleInstance, GeoSeriesInstance,
    InstanceHeader, Leaf,
};

pub fn map_series(submission: &Submission, template_id: &TemplateId) -> GeoSeriesInstance {
    let series = &submission.series;
    GeoSeriesInstance {
        header: InstanceHeader::new(template_id, &submission.gse),
        series_id: Leaf::new(&series.gse),
        series_title: Leaf::new(&series.title),
        series_summary: Leaf::from_option(series.summary.first().map(String::as_str)),
        series_overall_design: Leaf::from_option(
            series.overall_design.first().map(String::as_str),
        ),
        pubmed_id: series.pubmed_ids.iter().map(Leaf::new).collect(),
        sample_ids: submission
            .samples
            .values()
            .map(|sample| Leaf::new(&sample.gsm))
            .collect(),
    }
}

pub fn map_sample(sample: &Sample, template_id: &TemplateId) -> GeoSampleInstance {
    let per_channel_sample_info = sample
        .per_channel
        .iter()
        .map(|(number, channel)| ChannelInfo {
            channel_number: Leaf::new(number.to_string()),
            source_name: Leaf::new(&channel.source_name),
            organism: Leaf::new(&channel.organism),
            molecule: Leaf::new(&channel.molecule),
            label: Leaf::new(&channel.label),
            characteristics: channel
                .characteristics
                .iter()
                .map(|(tag, value)| Characteristic::new(tag, value))
                .collect(),
        })
        .collect();

    GeoSampleInstance {
        header: InstanceHeader::new(template_id, &sample.gsm),
        sample_id: Leaf::new(&sample.gsm),
        title: Leaf::new(&sample.title),
        description: sample.description.as_deref().map(Leaf::new),
        platform_id: Leaf::new(&sample.gpl),
        per_channel_sample_info,
    }
}

pub fn map_platform(platform: &Platform, template_id: &TemplateId) -> GeoPlatformInstance {
    GeoPlatformInstance {
        header: InstanceHeader::new(template_id, &platform.gpl),
        platform_id: Leaf::new(&platform.gpl),
        title: Leaf::new(&platform.title),
        organism: Leaf::new(&platform.organism),
        distribution: Leaf::new(&platform.distribution),
        manufacturer: platform.manufacturer.as_deref().map(Leaf::new),
    }
}
