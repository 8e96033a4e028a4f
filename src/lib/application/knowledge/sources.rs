use std::fs;
use std::path::Path;
use tracing::info;

use super::document::{Document, GuestRecord};
use super::error::KnowledgeError;
use crate::config::KnowledgeConfig;

/// Read every configured knowledge source. Unconfigured sources are skipped.
pub fn load_documents(config: &KnowledgeConfig) -> Result<Vec<Document>, KnowledgeError> {
    let mut documents = Vec::new();
    if let Some(path) = &config.guests {
        documents.extend(load_guests(path)?);
    }
    if let Some(path) = &config.menu {
        documents.push(load_text(path, "menu")?);
    }
    if let Some(path) = &config.schedule {
        documents.push(load_text(path, "schedule")?);
    }
    info!(documents = documents.len(), "Loaded knowledge sources");
    Ok(documents)
}

/// One document per guest in a JSON array of [`GuestRecord`]s.
pub fn load_guests(path: &Path) -> Result<Vec<Document>, KnowledgeError> {
    let raw = read(path)?;
    let guests: Vec<GuestRecord> =
        serde_json::from_str(&raw).map_err(|source| KnowledgeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let source = file_name(path);
    Ok(guests
        .iter()
        .enumerate()
        .map(|(position, guest)| guest.to_document(&source, position))
        .collect())
}

/// The whole file as a single document tagged with `kind`.
pub fn load_text(path: &Path, kind: &str) -> Result<Document, KnowledgeError> {
    let content = read(path)?;
    let source = file_name(path);
    Ok(Document::new(source.clone(), content)
        .with_metadata("source", source)
        .with_metadata("kind", kind))
}

fn read(path: &Path) -> Result<String, KnowledgeError> {
    fs::read_to_string(path).map_err(|source| KnowledgeError::Source {
        path: path.to_path_buf(),
        source,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
