// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for ToPDF.

use thiserror::Error;

/// Top-level error type for all ToPDF operations.
#[derive(Debug, Error)]
pub enum ToPdfError {
    // -- Conversion errors --
    #[error("no files to convert")]
    EmptyInput,

    #[error("unsupported file type: {0}")]
    UnsupportedInput(String),

    #[error("failed to decode {name}: {detail}")]
    Decode { name: String, detail: String },

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("DOCX text extraction failed: {0}")]
    DocxError(String),

    #[error("conversion failed: {0}")]
    ConversionFailed(String),

    // -- Page-removal errors --
    #[error("not a valid PDF document: {0}")]
    InvalidDocument(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page {index} out of range (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("no pages selected for removal")]
    EmptySelection,

    #[error("removing all {0} pages would leave an empty document")]
    EmptyResult(usize),

    #[error("page render failed: {0}")]
    RenderError(String),

    // -- Configuration / storage --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ToPdfError>;
