//! Document text extraction for uploaded offer documents.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Upload formats accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a file name's extension, ignoring case.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        ext.parse().ok()
    }
}

impl FromStr for DocumentFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "doc" => Ok(DocumentFormat::Doc),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Docx => "docx",
        };
        f.write_str(ext)
    }
}

#[derive(Debug, Error)]
pub enum DocumentProcessingError {
    #[error("document is empty")]
    Empty,

    #[error("no text extractor available for .{0} documents")]
    UnsupportedFormat(DocumentFormat),

    #[error("could not read document: {0}")]
    Unreadable(String),
}

/// Turns a document payload into plain text. Carried as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        bytes: Bytes,
        format: DocumentFormat,
    ) -> Result<String, DocumentProcessingError>;
}

/// `pdf-extract` backend. Pages are concatenated in order. Word formats are
/// rejected with `UnsupportedFormat`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(
        &self,
        bytes: Bytes,
        format: DocumentFormat,
    ) -> Result<String, DocumentProcessingError> {
        if bytes.is_empty() {
            return Err(DocumentProcessingError::Empty);
        }
        if format != DocumentFormat::Pdf {
            return Err(DocumentProcessingError::UnsupportedFormat(format));
        }

        // Parsing is CPU-bound and the parser can panic on hostile input; a
        // panic surfaces here as a JoinError.
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| format!("{e:?}"))
        })
        .await
        .map_err(|e| DocumentProcessingError::Unreadable(format!("parser aborted: {e}")))?
        .map_err(DocumentProcessingError::Unreadable)?;

        debug!("Extracted {} characters of PDF text", text.len());
        Ok(text)
    }
}
