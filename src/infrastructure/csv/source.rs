// ============================================================
// IMPORT SOURCES
// ============================================================
// Where the text of an uploaded CSV comes from

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::domain::error::{AppError, Result};

/// Anything that can hand over the full text of one import file
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    async fn read_text(&self) -> Result<String>;
}

/// Reject file names that do not look like CSV files
pub fn ensure_csv_file_name(name: &str) -> Result<()> {
    if name.to_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(AppError::ValidationError("Please select a CSV file".to_string()))
    }
}

/// Decode file bytes: BOM first, then UTF-8, then Windows-1252
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            // Spreadsheet exports on Windows are the usual non-UTF-8 input
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

fn ensure_within_limit(size: u64, max_bytes: u64) -> Result<()> {
    if size > max_bytes {
        return Err(AppError::ValidationError(format!(
            "file is {} bytes, limit is {} bytes",
            size, max_bytes
        )));
    }
    Ok(())
}

/// CSV file on local disk
#[derive(Debug, Clone)]
pub struct FileImportSource {
    path: PathBuf,
    name: String,
    max_bytes: u64,
}

impl FileImportSource {
    pub fn open(path: impl AsRef<Path>, max_bytes: u64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        ensure_csv_file_name(&name)?;

        Ok(Self {
            path,
            name,
            max_bytes,
        })
    }
}

#[async_trait]
impl ImportSource for FileImportSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> Result<String> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            AppError::IoError(format!("Failed to open file {}: {}", self.path.display(), e))
        })?;
        ensure_within_limit(metadata.len(), self.max_bytes)?;

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::IoError(format!("Failed to read file {}: {}", self.path.display(), e))
        })?;

        Ok(decode_bytes(&bytes))
    }
}

/// File contents already in memory, e.g. an HTTP upload
#[derive(Debug, Clone)]
pub struct BytesImportSource {
    name: String,
    bytes: Vec<u8>,
    max_bytes: u64,
}

impl BytesImportSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>, max_bytes: u64) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            max_bytes,
        }
    }
}

#[async_trait]
impl ImportSource for BytesImportSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> Result<String> {
        ensure_within_limit(self.bytes.len() as u64, self.max_bytes)?;
        Ok(decode_bytes(&self.bytes))
    }
}
