//! Reading submissions out of a GEOmetadb SQLite snapshot.
//!
//! GEOmetadb stores one row per series (`gse`), sample (`gsm`) and platform
//! (`gpl`), linked through `gse_gsm` and `gse_gpl`. Multi-valued cells are joined
//! with `";\t"`, and characteristics cells hold `tag: value` entries.

use std::collections::BTreeMap;

use camino::Utf8Path;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row, params};
use tracing::{debug, info};

use crate::domain::{PerChannelInfo, Platform, Sample, Series, SeriesRange, Submission};
use crate::error::IngestError;

pub const VALUE_SEPARATOR: &str = ";\t";
pub const UNTAGGED_CHARACTERISTIC: &str = "characteristic";
const MAX_CHANNELS: u32 = 2;

pub trait MetadataSource {
    fn extract_submissions(&self, range: SeriesRange) -> Result<Vec<Submission>, IngestError>;
}

pub struct GeoMetadb {
    conn: Connection,
}

impl GeoMetadb {
    /// Opens an existing snapshot read-only.
    pub fn open(path: &Utf8Path) -> Result<Self, IngestError> {
        if !path.as_std_path().exists() {
            return Err(IngestError::MetadbMissing(path.to_path_buf()));
        }
        info!("opening GEOmetadb {path}");
        let conn = Connection::open_with_flags(
            path.as_std_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn series_window(&self, range: SeriesRange) -> Result<Vec<Series>, IngestError> {
        let mut stmt = self.conn.prepare(
            "SELECT gse, title, summary, overall_design, pubmed_id FROM gse \
             ORDER BY rowid LIMIT ?1 OFFSET ?2",
        )?;
        // SQLite reads a negative OFFSET as 0 and a negative LIMIT as unbounded, so
        // out-of-range values saturate instead of wrapping.
        let limit = i64::try_from(range.count).unwrap_or(i64::MAX);
        let offset = i64::try_from(range.start).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit, offset], |row| {
            Ok(Series {
                gse: text(row, 0)?.unwrap_or_default(),
                title: text(row, 1)?.unwrap_or_default(),
                summary: text(row, 2)?.into_iter().collect(),
                overall_design: text(row, 3)?.into_iter().collect(),
                pubmed_ids: split_values(text(row, 4)?.as_deref()),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn samples(&self, gse: &str) -> Result<BTreeMap<String, Sample>, IngestError> {
        let mut stmt = self.conn.prepare(
            "SELECT gsm.gsm, gsm.gpl, gsm.title, gsm.description, gsm.channel_count, \
                    gsm.source_name_ch1, gsm.organism_ch1, gsm.molecule_ch1, gsm.label_ch1, \
                    gsm.characteristics_ch1, \
                    gsm.source_name_ch2, gsm.organism_ch2, gsm.molecule_ch2, gsm.label_ch2, \
                    gsm.characteristics_ch2 \
             FROM gse_gsm JOIN gsm ON gse_gsm.gsm = gsm.gsm \
             WHERE gse_gsm.gse = ?1",
        )?;
        let rows = stmt.query_map(params![gse], sample_from_row)?;

        let mut samples = BTreeMap::new();
        for sample in rows {
            let sample = sample?;
            samples.insert(sample.gsm.clone(), sample);
        }
        Ok(samples)
    }

    fn platforms(&self, gse: &str) -> Result<Vec<Platform>, IngestError> {
        let mut stmt = self.conn.prepare(
            "SELECT gpl.gpl, gpl.title, gpl.organism, gpl.distribution, gpl.manufacturer \
             FROM gse_gpl JOIN gpl ON gse_gpl.gpl = gpl.gpl \
             WHERE gse_gpl.gse = ?1 ORDER BY gpl.gpl",
        )?;
        let rows = stmt.query_map(params![gse], |row| {
            Ok(Platform {
                gpl: text(row, 0)?.unwrap_or_default(),
                title: text(row, 1)?.unwrap_or_default(),
                organism: text(row, 2)?.unwrap_or_default(),
                distribution: text(row, 3)?.unwrap_or_default(),
                manufacturer: text(row, 4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl MetadataSource for GeoMetadb {
    fn extract_submissions(&self, range: SeriesRange) -> Result<Vec<Submission>, IngestError> {
        let mut submissions = Vec::new();
        for series in self.series_window(range)? {
            let samples = self.samples(&series.gse)?;
            let platforms = self.platforms(&series.gse)?;
            debug!(
                "read {} with {} samples and {} platforms",
                series.gse,
                samples.len(),
                platforms.len()
            );
            submissions.push(Submission {
                gse: series.gse.clone(),
                series,
                samples,
                platforms,
            });
        }
        info!(
            "read {} series starting at index {}",
            submissions.len(),
            range.start
        );
        Ok(submissions)
    }
}

fn sample_from_row(row: &Row<'_>) -> rusqlite::Result<Sample> {
    let channel_count = text(row, 4)?
        .and_then(|count| count.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_CHANNELS);

    let mut per_channel = BTreeMap::new();
    for channel in 1..=channel_count {
        let base = 5 + (channel as usize - 1) * 5;
        per_channel.insert(
            channel,
            PerChannelInfo {
                channel,
                source_name: text(row, base)?.unwrap_or_default(),
                organism: text(row, base + 1)?.unwrap_or_default(),
                molecule: text(row, base + 2)?.unwrap_or_default(),
                label: text(row, base + 3)?.unwrap_or_default(),
                characteristics: parse_characteristics(text(row, base + 4)?.as_deref()),
            },
        );
    }

    let mut organisms = Vec::new();
    let mut molecules = Vec::new();
    let mut characteristics = BTreeMap::new();
    for info in per_channel.values() {
        for organism in split_values(Some(info.organism.as_str())) {
            if !organisms.contains(&organism) {
                organisms.push(organism);
            }
        }
        for molecule in split_values(Some(info.molecule.as_str())) {
            if !molecules.contains(&molecule) {
                molecules.push(molecule);
            }
        }
        for (tag, value) in &info.characteristics {
            characteristics
                .entry(tag.clone())
                .or_insert_with(|| value.clone());
        }
    }

    Ok(Sample {
        gsm: text(row, 0)?.unwrap_or_default(),
        gpl: text(row, 1)?.unwrap_or_default(),
        title: text(row, 2)?.unwrap_or_default(),
        description: text(row, 3)?,
        organisms,
        molecules,
        per_channel,
        characteristics,
    })
}

/// Reads any cell as text. GEOmetadb declares most columns TEXT but some snapshots
/// carry integers (`pubmed_id`, `channel_count`).
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let value = match row.get::<_, Value>(idx)? {
        Value::Null => None,
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(n) => Some(n.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    };
    Ok(value.filter(|s| !s.trim().is_empty()))
}

pub fn split_values(cell: Option<&str>) -> Vec<String> {
    cell.map(|cell| {
        cell.split(VALUE_SEPARATOR)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Splits a characteristics cell into tag/value pairs.
///
/// Entries without a tag are filed under `characteristic`. When a tag repeats,
/// later entries get a numbered key (`tissue 2`, `tissue 3`, ...) so no value is
/// dropped.
pub fn parse_characteristics(cell: Option<&str>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for entry in split_values(cell) {
        match entry.split_once(':') {
            Some((tag, value)) if !tag.trim().is_empty() => {
                insert_numbered(&mut out, tag.trim(), value.trim().to_string());
            }
            _ => insert_numbered(&mut out, UNTAGGED_CHARACTERISTIC, entry),
        }
    }
    out
}

fn insert_numbered(out: &mut BTreeMap<String, String>, tag: &str, value: String) {
    let mut key = tag.to_string();
    let mut n = 2;
    while out.contains_key(&key) {
        key = format!("{tag} {n}");
        n += 1;
    }
    out.insert(key, value);
}
