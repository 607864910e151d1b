// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch conversion: images, plain text and Word documents into one PDF.
//
// Every input file starts on a fresh page, in input order. A file that cannot
// be converted never aborts the batch: whatever it wrote is rolled back and a
// single placeholder line takes its page instead.

use tracing::{debug, info, instrument, warn};

use topdf_core::error::{Result, ToPdfError};
use topdf_core::{AppConfig, Artifact, FileClass, SelectedFile};

use crate::docx::extract_docx_text;
use crate::pdf::writer::{PageLayout, PdfWriter};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How a batch is laid out and named.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub layout: PageLayout,
    pub output_name: String,
    pub title: String,
}

impl ConvertOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            layout: PageLayout::from_config(config),
            output_name: config.converted_file_name.clone(),
            title: "Converted files".to_string(),
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Convert `files` into one PDF artifact.
#[instrument(skip_all, fields(files = files.len()))]
pub fn convert_files(files: &[SelectedFile], options: &ConvertOptions) -> Result<Artifact> {
    if files.is_empty() {
        return Err(ToPdfError::EmptyInput);
    }

    let mut writer = PdfWriter::new(&options.title, options.layout.clone());
    let mut failed = 0usize;

    for file in files {
        writer.start_page();
        let checkpoint = writer.checkpoint();

        if let Err(err) = append_file(&mut writer, file) {
            writer.rollback(checkpoint);
            match &err {
                ToPdfError::UnsupportedInput(_) => {
                    info!(file = %file.name(), "unsupported file type, writing placeholder")
                }
                _ => {
                    failed += 1;
                    warn!(file = %file.name(), error = %err, "file conversion failed");
                }
            }
            writer.write_placeholder(&placeholder_text(file, &err));
        }
    }

    let pages = writer.page_count();
    let bytes = writer.finish();
    info!(
        files = files.len(),
        failed,
        pages,
        output_bytes = bytes.len(),
        "conversion complete"
    );
    Ok(Artifact::new(options.output_name.clone(), bytes))
}

/// Render one file onto the writer's current page (and any pages its text
/// overflows onto).
pub fn append_file(writer: &mut PdfWriter, file: &SelectedFile) -> Result<()> {
    match file.class() {
        FileClass::Image => {
            let placement = writer.place_image(file.bytes())?;
            debug!(file = %file.name(), ?placement, "image page");
        }
        FileClass::PlainText => {
            let text = decode_text(file)?;
            let lines = writer.write_text(&text);
            debug!(file = %file.name(), lines, "text page");
        }
        FileClass::WordDocument => {
            let text = extract_docx_text(file.bytes())?;
            let lines = writer.write_text(&text);
            debug!(file = %file.name(), lines, "word document page");
        }
        FileClass::Pdf | FileClass::Unknown => {
            return Err(ToPdfError::UnsupportedInput(file.name().to_string()));
        }
    }
    Ok(())
}

/// Strict UTF-8 decode with a leading byte-order mark stripped.
pub fn decode_text(file: &SelectedFile) -> Result<String> {
    let bytes = file.bytes();
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ToPdfError::Decode {
            name: file.name().to_string(),
            detail: e.to_string(),
        })
}

/// The line written in place of a file that could not be converted.
pub fn placeholder_text(file: &SelectedFile, err: &ToPdfError) -> String {
    match err {
        ToPdfError::UnsupportedInput(_) => format!("Unsupported file type: {}", file.name()),
        _ => format!("Error converting {}", file.name()),
    }
}
