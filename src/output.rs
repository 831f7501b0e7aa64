use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::info;

use crate::error::IngestError;
use crate::instance::Instance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
}

/// Writes instances as `<accession>.json` into one directory.
#[derive(Debug, Clone)]
pub struct InstanceWriter {
    dir: Utf8PathBuf,
}

impl InstanceWriter {
    pub fn new(dir: &Utf8Path) -> Result<Self, IngestError> {
        if !dir.as_std_path().is_dir() {
            return Err(IngestError::MissingOutputDir(dir.to_path_buf()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn path_for(&self, accession: &str) -> Utf8PathBuf {
        self.dir.join(format!("{accession}.json"))
    }

    /// Serializes to a temp file beside the target, then renames it over
    /// `<accession>.json`.
    pub fn write<T: Instance>(&self, instance: &T) -> Result<WriteOutcome, IngestError> {
        let accession = instance.accession();
        let path = self.path_for(accession);
        let content =
            serde_json::to_vec_pretty(instance).map_err(|err| IngestError::Serialize {
                name: accession.to_string(),
                message: err.to_string(),
            })?;

        let outcome = if path.as_std_path().exists() {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };

        let write_err = |message: String| IngestError::OutputWrite {
            path: path.clone(),
            message,
        };
        let mut temp = tempfile::Builder::new()
            .prefix(".geo-ingestor")
            .suffix(".json.tmp")
            .tempfile_in(self.dir.as_std_path())
            .map_err(|err| write_err(err.to_string()))?;
        temp.write_all(&content)
            .and_then(|_| temp.write_all(b"\n"))
            .map_err(|err| write_err(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| write_err(err.error.to_string()))?;

        match outcome {
            WriteOutcome::Created => info!("New file created: {path}"),
            WriteOutcome::Overwritten => info!("File overwritten: {path}"),
        }
        Ok(outcome)
    }
}

/// Prints a run summary as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    let mut stdout = io::stdout();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
