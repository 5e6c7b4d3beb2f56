//! Document Extractor — converts an uploaded PDF or DOCX into plain text.
//!
//! Extraction never panics and never aborts a batch: every failure mode is a
//! tagged `ExtractError` variant that the orchestrator absorbs into a
//! per-resume fallback record. Page-level extraction failures inside an
//! otherwise readable PDF contribute nothing and are logged at debug.

use std::io::Cursor;

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {filename} (only .pdf and .docx are accepted)")]
    Unsupported { filename: String },

    #[error("PDF is encrypted and could not be opened with an empty password")]
    Encrypted,

    #[error("no extractable text found in document")]
    NoText,

    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read DOCX: {0}")]
    Docx(String),
}

/// Extracts plain text from a resume or JD upload. Dispatch is by filename
/// extension only, case-insensitive; exactly `pdf` and `docx` are supported.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => extract_pdf(bytes),
        "docx" => extract_docx(bytes),
        _ => Err(ExtractError::Unsupported {
            filename: filename.to_string(),
        }),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut doc =
        Document::load_from(Cursor::new(bytes)).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    if doc.is_encrypted() {
        // An empty password sometimes works; anything else is unrecoverable here.
        doc.decrypt("").map_err(|_| ExtractError::Encrypted)?;
    }

    let pages = doc.get_pages();
    let mut text = String::new();
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                if !page_text.trim().is_empty() {
                    text.push_str(&page_text);
                    text.push(' ');
                }
            }
            Err(e) => {
                debug!("skipping PDF page {page_num}: {e}");
            }
        }
    }

    let out = text.trim();
    if out.is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(out.to_string())
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut lines: Vec<String> = Vec::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for para_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            if !line.trim().is_empty() {
                lines.push(line.trim().to_string());
            }
        }
    }

    let out = lines.join("\n");
    if out.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(out)
}
