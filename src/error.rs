use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("GEOmetadb not found at {0}")]
    MetadbMissing(Utf8PathBuf),

    #[error("error reading GEOmetadb: {0}")]
    MetadbRead(#[from] rusqlite::Error),

    #[error("error reading template file {path}: {message}")]
    TemplateRead { path: Utf8PathBuf, message: String },

    #[error("error parsing template file {path}: {message}")]
    TemplateParse { path: Utf8PathBuf, message: String },

    #[error("template file {0} has no textual @id")]
    #[diagnostic(help("CEDAR templates declare their identifier in a top-level \"@id\" field"))]
    MissingTemplateId(Utf8PathBuf),

    #[error("sample {gsm} has no per-channel information keyed {channel}")]
    #[diagnostic(help("BioSample mapping only reads the channel keyed 1"))]
    MissingChannel { gsm: String, channel: u32 },

    #[error("output directory does not exist: {0}")]
    MissingOutputDir(Utf8PathBuf),

    #[error("error creating instance file {path}: {message}")]
    OutputWrite { path: Utf8PathBuf, message: String },

    #[error("failed to serialize instance {name}: {message}")]
    Serialize { name: String, message: String },
}

impl IngestError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            IngestError::InvalidArgument(_)
            | IngestError::TemplateRead { .. }
            | IngestError::TemplateParse { .. }
            | IngestError::MissingTemplateId(_)
            | IngestError::MissingOutputDir(_) => 2,
            IngestError::MetadbMissing(_) | IngestError::MetadbRead(_) => 3,
            IngestError::OutputWrite { .. } | IngestError::Serialize { .. } => 4,
            IngestError::MissingChannel { .. } => 1,
        }
    }
}
