use std::fs;

use camino::Utf8Path;
use serde_json::Value;
use tracing::info;

use crate::domain::TemplateId;
use crate::error::IngestError;

/// Reads a CEDAR template and returns its top-level `@id`.
pub fn resolve_template_id(path: &Utf8Path) -> Result<TemplateId, IngestError> {
    let content = fs::read_to_string(path.as_std_path()).map_err(|err| {
        IngestError::TemplateRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    let id = template_id_from_str(&content, path)?;
    info!("template {path} has id {id}");
    Ok(id)
}

fn template_id_from_str(content: &str, path: &Utf8Path) -> Result<TemplateId, IngestError> {
    let value: Value = serde_json::from_str(content).map_err(|err| IngestError::TemplateParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    value
        .get("@id")
        .and_then(Value::as_str)
        .ok_or_else(|| IngestError::MissingTemplateId(path.to_path_buf()))?
        .parse()
        .map_err(|_| IngestError::MissingTemplateId(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn extracts_top_level_id() {
        let path = Utf8Path::new("biosample.json");
        let id = template_id_from_str(
            r#"{"@id": "https://repo.metadatacenter.org/templates/bs", "@type": "Template", "properties": {"@id": {}}}"#,
            path,
        )
        .unwrap();
        assert_eq!(id.as_str(), "https://repo.metadatacenter.org/templates/bs");
    }

    #[test]
    fn rejects_missing_or_non_text_id() {
        let path = Utf8Path::new("t.json");
        assert_matches!(
            template_id_from_str(r#"{"title": "no id"}"#, path),
            Err(IngestError::MissingTemplateId(_))
        );
        assert_matches!(
            template_id_from_str(r#"{"@id": 42}"#, path),
            Err(IngestError::MissingTemplateId(_))
        );
        assert_matches!(
            template_id_from_str(r#"{"@id": ""}"#, path),
            Err(IngestError::MissingTemplateId(_))
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let err = template_id_from_str("{\"@id\": ", Utf8Path::new("t.json")).unwrap_err();
        assert_matches!(err, IngestError::TemplateParse { .. });
    }
}
