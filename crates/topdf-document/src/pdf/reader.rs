// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open existing PDF documents, count their pages, and strip
// selected pages using the `lopdf` crate.

use lopdf::Document;
use topdf_core::error::{Result, ToPdfError};
use tracing::{debug, info, instrument};

/// Reads and mutates existing PDF files.
///
/// Wraps `lopdf::Document`. Mutating operations work on a clone, so a failure
/// part-way through never leaves a half-edited document behind.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    /// Parse raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            ToPdfError::InvalidDocument(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Produce a copy of the document without the pages at `indices`
    /// (zero-based), serialised to bytes.
    ///
    /// Indices are deduplicated and validated before anything is deleted.
    /// Deletion runs from the highest index down: removing a page renumbers
    /// every page after it, so ascending order would hit the wrong pages.
    /// Removing every page is rejected with [`ToPdfError::EmptyResult`].
    #[instrument(skip(self), fields(page_count = self.page_count()))]
    pub fn remove_pages(&self, indices: &[usize]) -> Result<Vec<u8>> {
        if indices.is_empty() {
            return Err(ToPdfError::EmptySelection);
        }

        let page_count = self.page_count();
        let mut descending = indices.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        descending.dedup();

        if let Some(&highest) = descending.first() {
            if highest >= page_count {
                return Err(ToPdfError::PageOutOfRange {
                    index: highest,
                    page_count,
                });
            }
        }
        if descending.len() == page_count {
            return Err(ToPdfError::EmptyResult(page_count));
        }

        info!(remove = ?descending, page_count, "Removing pages");

        let mut doc = self.document.clone();
        for index in &descending {
            // lopdf page numbers are 1-indexed.
            doc.delete_pages(&[*index as u32 + 1]);
        }
        doc.prune_objects();

        let remaining = doc.get_pages().len();
        if remaining != page_count - descending.len() {
            return Err(ToPdfError::PdfError(format!(
                "expected {} pages after removal, found {}",
                page_count - descending.len(),
                remaining
            )));
        }

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(|err| {
            ToPdfError::PdfError(format!("failed to serialise modified PDF: {}", err))
        })?;

        debug!(remaining, output_bytes = output.len(), "Pages removed");
        Ok(output)
    }
}

/// Parse `data` and report its page count.
pub fn count_pages(data: &[u8]) -> Result<usize> {
    Ok(PdfReader::from_bytes(data)?.page_count())
}

/// Parse `data` and strip the pages at `indices`.
pub fn remove_pages(data: &[u8], indices: &[usize]) -> Result<Vec<u8>> {
    PdfReader::from_bytes(data)?.remove_pages(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{numbered_pdf, page_labels};

    #[test]
    fn counts_pages() {
        assert_eq!(count_pages(&numbered_pdf(6)).unwrap(), 6);
    }

    #[test]
    fn garbage_is_an_invalid_document() {
        assert!(matches!(
            count_pages(b"definitely not a pdf"),
            Err(ToPdfError::InvalidDocument(_))
        ));
    }

    #[test]
    fn removes_two_and_five_from_six_pages() {
        let output = remove_pages(&numbered_pdf(6), &[2, 5]).unwrap();
        assert_eq!(page_labels(&output), vec![0, 1, 3, 4]);
    }

    #[test]
    fn request_order_does_not_matter() {
        let source = numbered_pdf(6);
        let ascending = remove_pages(&source, &[1, 3]).unwrap();
        let descending = remove_pages(&source, &[3, 1]).unwrap();
        assert_eq!(page_labels(&ascending), vec![0, 2, 4, 5]);
        assert_eq!(page_labels(&descending), page_labels(&ascending));
    }

    #[test]
    fn duplicate_indices_remove_once() {
        let output = remove_pages(&numbered_pdf(3), &[1, 1]).unwrap();
        assert_eq!(page_labels(&output), vec![0, 2]);
    }

    #[test]
    fn out_of_range_fails_without_output() {
        let err = remove_pages(&numbered_pdf(3), &[0, 3]).unwrap_err();
        assert!(matches!(
            err,
            ToPdfError::PageOutOfRange {
                index: 3,
                page_count: 3
            }
        ));
    }

    #[test]
    fn removing_every_page_is_rejected() {
        let err = remove_pages(&numbered_pdf(2), &[0, 1]).unwrap_err();
        assert!(matches!(err, ToPdfError::EmptyResult(2)));
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(
            remove_pages(&numbered_pdf(2), &[]),
            Err(ToPdfError::EmptySelection)
        ));
    }

    #[test]
    fn source_reader_is_untouched() {
        let reader = PdfReader::from_bytes(&numbered_pdf(4)).unwrap();
        reader.remove_pages(&[0]).unwrap();
        assert_eq!(reader.page_count(), 4);
    }
}
