//! Conversions from GEOmetadb records to CEDAR template instances.

pub mod biosample;
pub mod cedar;
pub mod combined;

pub use biosample::{BIOSAMPLE_CHANNEL, BioSampleMapping, HUMAN, map_biosample};
pub use cedar::{map_platform, map_sample, map_series};
pub use combined::map_combined;
