// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX text extraction.
//
// A .docx file is a zip archive; the body lives in `word/document.xml` as
// WordprocessingML. Only run text is extracted: formatting, images, tables
// structure and headers are ignored.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use topdf_core::error::{Result, ToPdfError};
use tracing::{debug, instrument};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Separator between paragraphs in the extracted text.
const PARAGRAPH_BREAK: &str = "\n\n";

/// Extract the raw text of a .docx document.
///
/// Paragraphs are separated by a blank line; `w:tab` becomes a tab and
/// `w:br`/`w:cr` become newlines.
#[instrument(skip_all, fields(bytes_len = data.len()))]
pub fn extract_docx_text(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ToPdfError::DocxError(format!("not a zip archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ToPdfError::DocxError(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ToPdfError::DocxError(format!("failed to read {DOCUMENT_PART}: {e}")))?;

    let text = parse_document_xml(&xml)?;
    debug!(chars = text.len(), "DOCX text extracted");
    Ok(text)
}

fn parse_document_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"t" => in_text = true,
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            }
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            }
            Ok(Event::Text(ref t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ToPdfError::DocxError(format!("bad text node: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if in_paragraph => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ToPdfError::DocxError(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join(PARAGRAPH_BREAK).trim_end().to_string())
}
