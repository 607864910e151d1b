// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-removal flow session: one source PDF, a page selection, per-page
// thumbnail slots, and at most one artifact.
//
// Two counters guard against late results. `load_seq` identifies the most
// recent load attempt; `generation` identifies the currently installed
// document. Thumbnail and removal results carry the generation they were
// started under and are ignored once it changes.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{Result, ToPdfError};
use crate::types::{Artifact, FileClass, SelectedFile, Thumbnail};

const DEFAULT_PREFIX: &str = "modified_";

/// Where the page-removal flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPhase {
    /// No document.
    NoFile,
    /// Page count being determined.
    Loading,
    /// Document loaded, selection active.
    Loaded,
    /// Removal in flight.
    Processing,
    /// Artifact available for download.
    Ready,
}

/// Preview state of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailSlot {
    Pending,
    Rendered(Thumbnail),
    /// Rendering failed; the page stays selectable without a preview.
    Failed(String),
}

/// Ticket for an in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

/// Everything a background removal task needs.
#[derive(Debug, Clone)]
pub struct RemovalRequest {
    pub generation: u64,
    pub source: SelectedFile,
    /// Selected page indices, ascending.
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone)]
struct LoadedDocument {
    file: SelectedFile,
    page_count: usize,
}

/// State of the page-removal flow.
#[derive(Debug, Clone)]
pub struct RemovalSession {
    document: Option<LoadedDocument>,
    pending: Option<SelectedFile>,
    selection: HashSet<usize>,
    thumbnails: Vec<ThumbnailSlot>,
    artifact: Option<Artifact>,
    processing: bool,
    load_seq: u64,
    generation: u64,
    output_prefix: String,
}

impl Default for RemovalSession {
    fn default() -> Self {
        Self::with_output_prefix(DEFAULT_PREFIX)
    }
}

impl RemovalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose artifacts are named `<prefix><original name>`.
    pub fn with_output_prefix(prefix: impl Into<String>) -> Self {
        Self {
            document: None,
            pending: None,
            selection: HashSet::new(),
            thumbnails: Vec::new(),
            artifact: None,
            processing: false,
            load_seq: 0,
            generation: 0,
            output_prefix: prefix.into(),
        }
    }

    pub fn phase(&self) -> RemovalPhase {
        if self.pending.is_some() {
            RemovalPhase::Loading
        } else if self.document.is_none() {
            RemovalPhase::NoFile
        } else if self.processing {
            RemovalPhase::Processing
        } else if self.artifact.is_some() {
            RemovalPhase::Ready
        } else {
            RemovalPhase::Loaded
        }
    }

    /// The loaded source document.
    pub fn document(&self) -> Option<&SelectedFile> {
        self.document.as_ref().map(|d| &d.file)
    }

    /// The file currently being loaded, if any.
    pub fn pending_file(&self) -> Option<&SelectedFile> {
        self.pending.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, |d| d.page_count)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn thumbnails(&self) -> &[ThumbnailSlot] {
        &self.thumbnails
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected page indices, ascending.
    pub fn selection(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self.selection.iter().copied().collect();
        pages.sort_unstable();
        pages
    }

    // -- Loading --------------------------------------------------------------

    /// Start loading `file`. Non-PDF files are rejected without touching state.
    pub fn begin_load(&mut self, file: SelectedFile) -> Result<LoadTicket> {
        if file.class() != FileClass::Pdf {
            warn!(file = %file.name(), class = file.class().label(), "rejected non-PDF file");
            return Err(ToPdfError::InvalidDocument(format!(
                "{} is not a PDF",
                file.name()
            )));
        }
        self.load_seq += 1;
        info!(file = %file.name(), bytes = file.size(), "loading PDF");
        self.pending = Some(file);
        Ok(LoadTicket { seq: self.load_seq })
    }

    /// Apply the page count determined for a load.
    ///
    /// Success installs the document with an empty selection and one pending
    /// thumbnail slot per page. Failure drops the pending file and leaves the
    /// previous document (if any) untouched. Returns `Ok(false)` for a stale
    /// ticket.
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: Result<usize>) -> Result<bool> {
        if ticket.seq != self.load_seq || self.pending.is_none() {
            debug!(ticket = ticket.seq, current = self.load_seq, "dropping stale load result");
            return Ok(false);
        }
        let Some(file) = self.pending.take() else {
            return Ok(false);
        };

        let page_count = outcome?;
        if page_count == 0 {
            return Err(ToPdfError::InvalidDocument(format!(
                "{} has no pages",
                file.name()
            )));
        }

        self.generation += 1;
        self.selection.clear();
        self.thumbnails = vec![ThumbnailSlot::Pending; page_count];
        self.artifact = None;
        self.processing = false;
        info!(file = %file.name(), pages = page_count, generation = self.generation, "PDF loaded");
        self.document = Some(LoadedDocument { file, page_count });
        Ok(true)
    }

    /// Store a finished thumbnail render. Returns whether it was applied.
    pub fn apply_thumbnail(
        &mut self,
        generation: u64,
        index: usize,
        outcome: Result<Thumbnail>,
    ) -> bool {
        if generation != self.generation {
            debug!(index, generation, current = self.generation, "dropping stale thumbnail");
            return false;
        }
        let Some(slot) = self.thumbnails.get_mut(index) else {
            warn!(index, pages = self.thumbnails.len(), "thumbnail index out of range");
            return false;
        };
        *slot = match outcome {
            Ok(thumbnail) => ThumbnailSlot::Rendered(thumbnail),
            Err(e) => {
                warn!(page = index + 1, error = %e, "thumbnail render failed");
                ThumbnailSlot::Failed(e.to_string())
            }
        };
        true
    }

    // -- Selection ------------------------------------------------------------

    /// Flip membership of `index`, returning whether it is now selected.
    ///
    /// A finished result no longer matches the selection, so it is discarded
    /// and the session returns to `Loaded`.
    pub fn toggle_page(&mut self, index: usize) -> Result<bool> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(ToPdfError::PageOutOfRange { index, page_count });
        }
        if self.artifact.take().is_some() {
            debug!(page = index + 1, "selection changed, discarding result");
        }
        if self.selection.remove(&index) {
            Ok(false)
        } else {
            self.selection.insert(index);
            Ok(true)
        }
    }

    // -- Removal --------------------------------------------------------------

    /// Enter `Processing` and describe the work to do.
    pub fn begin_removal(&mut self) -> Result<RemovalRequest> {
        let Some(document) = self.document.as_ref() else {
            return Err(ToPdfError::InvalidDocument("no document loaded".into()));
        };
        if self.selection.is_empty() {
            return Err(ToPdfError::EmptySelection);
        }
        let request = RemovalRequest {
            generation: self.generation,
            source: document.file.clone(),
            indices: self.selection(),
        };
        self.processing = true;
        info!(pages = ?request.indices, "page removal started");
        Ok(request)
    }

    /// Apply the outcome of a removal started under `generation`.
    ///
    /// A failure leaves any previous artifact in place.
    pub fn finish_removal(&mut self, generation: u64, outcome: Result<Vec<u8>>) -> Result<bool> {
        if generation != self.generation || !self.processing {
            debug!(generation, current = self.generation, "dropping stale removal result");
            return Ok(false);
        }
        self.processing = false;
        let bytes = outcome?;
        let name = self
            .document()
            .map(|f| format!("{}{}", self.output_prefix, f.name()))
            .unwrap_or_else(|| format!("{}document.pdf", self.output_prefix));
        info!(bytes = bytes.len(), name = %name, "page removal ready");
        self.artifact = Some(Artifact::new(name, bytes));
        Ok(true)
    }

    /// "Upload different file": discard everything and return to `NoFile`.
    pub fn reset(&mut self) {
        self.document = None;
        self.pending = None;
        self.selection.clear();
        self.thumbnails.clear();
        self.artifact = None;
        self.processing = false;
        self.load_seq += 1;
        self.generation += 1;
        debug!(generation = self.generation, "removal session reset");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, Some("application/pdf".into()), b"%PDF-1.5".to_vec())
    }

    fn loaded(pages: usize) -> RemovalSession {
        let mut session = RemovalSession::new();
        let ticket = session.begin_load(pdf("deck.pdf")).unwrap();
        assert!(session.complete_load(ticket, Ok(pages)).unwrap());
        session
    }

    fn thumb() -> Thumbnail {
        Thumbnail {
            width: 200,
            height: 283,
            png: Arc::from(vec![0u8; 4]),
        }
    }

    #[test]
    fn load_installs_document_and_slots() {
        let mut session = RemovalSession::new();
        assert_eq!(session.phase(), RemovalPhase::NoFile);

        let ticket = session.begin_load(pdf("deck.pdf")).unwrap();
        assert_eq!(session.phase(), RemovalPhase::Loading);
        assert_eq!(session.pending_file().unwrap().name(), "deck.pdf");

        assert!(session.complete_load(ticket, Ok(6)).unwrap());
        assert_eq!(session.phase(), RemovalPhase::Loaded);
        assert_eq!(session.page_count(), 6);
        assert_eq!(session.thumbnails().len(), 6);
        assert!(session.thumbnails().iter().all(|t| *t == ThumbnailSlot::Pending));
    }

    #[test]
    fn non_pdf_never_mutates_state() {
        let mut session = loaded(4);
        session.toggle_page(2).unwrap();
        let generation = session.generation();

        let err = session
            .begin_load(SelectedFile::new("notes.txt", None, b"hi".to_vec()))
            .unwrap_err();
        assert!(matches!(err, ToPdfError::InvalidDocument(_)));
        assert_eq!(session.page_count(), 4);
        assert_eq!(session.selection(), vec![2]);
        assert_eq!(session.generation(), generation);
        assert_eq!(session.phase(), RemovalPhase::Loaded);
    }

    #[test]
    fn failed_parse_keeps_previous_document() {
        let mut session = loaded(3);
        session.toggle_page(1).unwrap();

        let ticket = session.begin_load(pdf("broken.pdf")).unwrap();
        let err = session
            .complete_load(ticket, Err(ToPdfError::InvalidDocument("bad xref".into())))
            .unwrap_err();
        assert!(matches!(err, ToPdfError::InvalidDocument(_)));
        assert_eq!(session.document().unwrap().name(), "deck.pdf");
        assert_eq!(session.page_count(), 3);
        assert_eq!(session.selection(), vec![1]);
        assert_eq!(session.phase(), RemovalPhase::Loaded);
    }

    #[test]
    fn zero_page_document_is_invalid() {
        let mut session = RemovalSession::new();
        let ticket = session.begin_load(pdf("empty.pdf")).unwrap();
        assert!(session.complete_load(ticket, Ok(0)).is_err());
        assert_eq!(session.phase(), RemovalPhase::NoFile);
    }

    #[test]
    fn new_document_clears_selection() {
        let mut session = loaded(5);
        session.toggle_page(0).unwrap();
        session.toggle_page(4).unwrap();

        let ticket = session.begin_load(pdf("other.pdf")).unwrap();
        session.complete_load(ticket, Ok(2)).unwrap();
        assert_eq!(session.selected_count(), 0);
        assert_eq!(session.page_count(), 2);
    }

    #[test]
    fn superseded_load_is_ignored() {
        let mut session = RemovalSession::new();
        let first = session.begin_load(pdf("first.pdf")).unwrap();
        let second = session.begin_load(pdf("second.pdf")).unwrap();

        assert!(!session.complete_load(first, Ok(10)).unwrap());
        assert!(session.complete_load(second, Ok(2)).unwrap());
        assert_eq!(session.document().unwrap().name(), "second.pdf");
        assert_eq!(session.page_count(), 2);
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut session = loaded(6);
        session.toggle_page(1).unwrap();
        let before = session.selection();

        assert!(session.toggle_page(3).unwrap());
        assert!(!session.toggle_page(3).unwrap());
        assert_eq!(session.selection(), before);
    }

    #[test]
    fn toggle_rejects_out_of_range() {
        let mut session = loaded(2);
        assert!(matches!(
            session.toggle_page(2),
            Err(ToPdfError::PageOutOfRange { index: 2, page_count: 2 })
        ));
        let mut empty = RemovalSession::new();
        assert!(empty.toggle_page(0).is_err());
    }

    #[test]
    fn thumbnails_land_in_their_own_slot_in_any_order() {
        let mut session = loaded(3);
        let generation = session.generation();

        assert!(session.apply_thumbnail(generation, 2, Ok(thumb())));
        assert!(session.apply_thumbnail(
            generation,
            0,
            Err(ToPdfError::RenderError("no pdfium".into()))
        ));

        assert!(matches!(session.thumbnails()[0], ThumbnailSlot::Failed(_)));
        assert_eq!(session.thumbnails()[1], ThumbnailSlot::Pending);
        assert!(matches!(session.thumbnails()[2], ThumbnailSlot::Rendered(_)));
        assert_eq!(session.page_count(), 3);
    }

    #[test]
    fn thumbnails_from_a_previous_document_are_dropped() {
        let mut session = loaded(3);
        let old = session.generation();
        session.reset();
        let ticket = session.begin_load(pdf("new.pdf")).unwrap();
        session.complete_load(ticket, Ok(3)).unwrap();

        assert!(!session.apply_thumbnail(old, 0, Ok(thumb())));
        assert_eq!(session.thumbnails()[0], ThumbnailSlot::Pending);
    }

    #[test]
    fn removal_requires_a_selection() {
        let mut session = loaded(3);
        assert!(matches!(session.begin_removal(), Err(ToPdfError::EmptySelection)));
        assert_eq!(session.phase(), RemovalPhase::Loaded);
    }

    #[test]
    fn removal_produces_a_named_artifact() {
        let mut session = loaded(6);
        session.toggle_page(5).unwrap();
        session.toggle_page(2).unwrap();

        let request = session.begin_removal().unwrap();
        assert_eq!(request.indices, vec![2, 5]);
        assert_eq!(session.phase(), RemovalPhase::Processing);

        assert!(session
            .finish_removal(request.generation, Ok(b"%PDF".to_vec()))
            .unwrap());
        assert_eq!(session.phase(), RemovalPhase::Ready);
        assert_eq!(session.artifact().unwrap().file_name(), "modified_deck.pdf");
    }

    #[test]
    fn failed_removal_keeps_previous_artifact() {
        let mut session = loaded(4);
        session.toggle_page(0).unwrap();
        let first = session.begin_removal().unwrap();
        session.finish_removal(first.generation, Ok(b"one".to_vec())).unwrap();

        let second = session.begin_removal().unwrap();
        assert!(session
            .finish_removal(second.generation, Err(ToPdfError::PdfError("x".into())))
            .is_err());
        assert_eq!(session.artifact().unwrap().bytes(), b"one");
        assert_eq!(session.phase(), RemovalPhase::Ready);
    }

    #[test]
    fn changing_the_selection_discards_the_result() {
        let mut session = loaded(4);
        session.toggle_page(0).unwrap();
        let request = session.begin_removal().unwrap();
        session.finish_removal(request.generation, Ok(b"one".to_vec())).unwrap();
        assert_eq!(session.phase(), RemovalPhase::Ready);

        session.toggle_page(2).unwrap();
        assert_eq!(session.phase(), RemovalPhase::Loaded);
        assert!(session.artifact().is_none());
        assert_eq!(session.selection(), vec![0, 2]);
    }

    #[test]
    fn reset_discards_everything_and_late_results() {
        let mut session = loaded(4);
        session.toggle_page(1).unwrap();
        let request = session.begin_removal().unwrap();

        session.reset();
        assert_eq!(session.phase(), RemovalPhase::NoFile);
        assert_eq!(session.selected_count(), 0);
        assert!(session.thumbnails().is_empty());

        assert!(!session
            .finish_removal(request.generation, Ok(b"late".to_vec()))
            .unwrap());
        assert!(session.artifact().is_none());
    }

    #[test]
    fn custom_prefix_names_the_artifact() {
        let mut session = RemovalSession::with_output_prefix("trimmed-");
        let ticket = session.begin_load(pdf("a.pdf")).unwrap();
        session.complete_load(ticket, Ok(2)).unwrap();
        session.toggle_page(0).unwrap();
        let request = session.begin_removal().unwrap();
        session.finish_removal(request.generation, Ok(vec![1])).unwrap();
        assert_eq!(session.artifact().unwrap().file_name(), "trimmed-a.pdf");
    }
}
