//! Client-side gate for document uploads.
//!
//! The backend OCR endpoint accepts `application/pdf` only. A
//! [`PdfDocument`] can only be built from content that passes this gate, so
//! anything that takes one never sees other file types.

use std::path::Path;

use crate::error::UploadError;

/// MIME type sent with uploads.
pub const PDF_MIME: &str = "application/pdf";

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file accepted for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    file_name: String,
    bytes: Vec<u8>,
}

impl PdfDocument {
    /// Accept `bytes` as a PDF named `file_name`.
    ///
    /// Requires a `.pdf` extension (any case), non-empty content and the
    /// `%PDF-` header.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();

        let has_pdf_extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !has_pdf_extension {
            return Err(UploadError::NotPdf { file_name });
        }
        if bytes.is_empty() {
            return Err(UploadError::Empty { file_name });
        }
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(UploadError::NotPdf { file_name });
        }

        Ok(Self { file_name, bytes })
    }

    /// Read and check a file from disk.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = std::fs::read(path).map_err(|e| UploadError::Io {
            file_name: file_name.clone(),
            message: e.to_string(),
        })?;

        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.file_name, self.bytes)
    }
}
