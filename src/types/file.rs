//! Files stored alongside the project (uploads, code interpreter outputs).

use serde::Deserialize;

/// Metadata for one stored file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
}

/// Paged listing envelope for files.
#[derive(Debug, Clone, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub data: Vec<FileInfo>,
}
