// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// topdf-document: Document processing for ToPDF.
//
// Thin adapters over the document crates: PDF generation (`printpdf`), PDF
// parsing and page removal (`lopdf`), page rendering (`pdfium-render`) and
// DOCX text extraction (`zip` + `quick-xml`), plus the conversion pipeline
// that strings them together.

pub mod convert;
pub mod docx;
pub mod pdf;
pub mod render;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the primary entry points so callers can use `topdf_document::convert_files` etc.
pub use convert::{ConvertOptions, convert_files};
pub use docx::extract_docx_text;
pub use pdf::reader::PdfReader;
pub use pdf::writer::{PageLayout, PdfWriter};
pub use render::{PageRenderer, PdfiumRenderer};
pub use tasks::{convert_files_async, count_pages_async, remove_pages_async, render_thumbnail};
