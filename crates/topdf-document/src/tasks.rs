// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async entry points for the UI.
//
// Every document operation here is CPU bound (image decoding, PDF parsing,
// rasterising), so each runs in `tokio::task::spawn_blocking` and the UI
// thread only awaits the result. A panicking task surfaces as an error
// rather than tearing down the caller.

use std::sync::Arc;

use tokio::task::JoinError;
use topdf_core::error::{Result, ToPdfError};
use topdf_core::{Artifact, SelectedFile, Thumbnail};

use crate::convert::{ConvertOptions, convert_files};
use crate::pdf::reader;
use crate::render::PageRenderer;

/// Convert `files` into one PDF on the blocking pool.
pub async fn convert_files_async(
    files: Vec<SelectedFile>,
    options: ConvertOptions,
) -> Result<Artifact> {
    tokio::task::spawn_blocking(move || convert_files(&files, &options))
        .await
        .map_err(conversion_panicked)?
}

fn conversion_panicked(err: JoinError) -> ToPdfError {
    ToPdfError::ConversionFailed(format!("conversion task panicked: {}", err))
}

/// Count the pages of `data` on the blocking pool.
pub async fn count_pages_async(data: Arc<[u8]>) -> Result<usize> {
    tokio::task::spawn_blocking(move || reader::count_pages(&data))
        .await
        .map_err(|e| ToPdfError::InvalidDocument(format!("page count task panicked: {}", e)))?
}

/// Strip the pages at `indices` from `data` on the blocking pool.
pub async fn remove_pages_async(data: Arc<[u8]>, indices: Vec<usize>) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || reader::remove_pages(&data, &indices))
        .await
        .map_err(|e| ToPdfError::PdfError(format!("removal task panicked: {}", e)))?
}

/// Render one page thumbnail on the blocking pool.
pub async fn render_thumbnail(
    renderer: Arc<dyn PageRenderer>,
    data: Arc<[u8]>,
    index: usize,
    target_width: u32,
) -> Result<Thumbnail> {
    tokio::task::spawn_blocking(move || renderer.render_page(&data, index, target_width))
        .await
        .map_err(|e| ToPdfError::RenderError(format!("page {} task panicked: {}", index + 1, e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{numbered_pdf, page_labels, png};
    use topdf_core::{RemovalPhase, RemovalSession, ThumbnailSlot};

    /// Renderer that draws nothing and fails on one chosen page.
    struct FakeRenderer {
        fail_on: usize,
    }

    impl PageRenderer for FakeRenderer {
        fn render_page(&self, _pdf: &[u8], index: usize, target_width: u32) -> Result<Thumbnail> {
            if index == self.fail_on {
                return Err(ToPdfError::RenderError(format!("page {} is cursed", index + 1)));
            }
            Ok(Thumbnail {
                width: target_width,
                height: target_width * 297 / 210,
                png: Arc::from(Vec::new()),
            })
        }
    }

    fn pdf_file(pages: usize) -> SelectedFile {
        SelectedFile::new("report.pdf", Some("application/pdf".into()), numbered_pdf(pages))
    }

    #[tokio::test]
    async fn converts_in_the_background() {
        let files = vec![SelectedFile::new("a.png", None, png(8, 8))];
        let artifact = convert_files_async(files, ConvertOptions::default())
            .await
            .unwrap();
        assert_eq!(artifact.file_name(), "converted_files.pdf");
        assert!(artifact.bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn load_then_remove_through_the_session() {
        let mut session = RemovalSession::new();
        let file = pdf_file(6);
        let data = file.data();

        let ticket = session.begin_load(file).unwrap();
        let count = count_pages_async(data.clone()).await;
        assert!(session.complete_load(ticket, count).unwrap());
        assert_eq!(session.page_count(), 6);

        session.toggle_page(5).unwrap();
        session.toggle_page(2).unwrap();
        let request = session.begin_removal().unwrap();
        assert_eq!(request.indices, vec![2, 5]);

        let outcome = remove_pages_async(request.source.data(), request.indices.clone()).await;
        assert!(session.finish_removal(request.generation, outcome).unwrap());
        assert_eq!(session.phase(), RemovalPhase::Ready);

        let artifact = session.artifact().unwrap();
        assert_eq!(artifact.file_name(), "modified_report.pdf");
        assert_eq!(page_labels(artifact.bytes()), vec![0, 1, 3, 4]);
    }

    #[tokio::test]
    async fn one_failed_thumbnail_leaves_the_others_rendered() {
        let mut session = RemovalSession::new();
        let file = pdf_file(3);
        let data = file.data();
        let ticket = session.begin_load(file).unwrap();
        session.complete_load(ticket, Ok(3)).unwrap();

        let renderer: Arc<dyn PageRenderer> = Arc::new(FakeRenderer { fail_on: 1 });
        let generation = session.generation();
        let handles: Vec<_> = (0..3)
            .map(|index| {
                tokio::spawn(render_thumbnail(renderer.clone(), data.clone(), index, 200))
            })
            .collect();

        // Apply in reverse to show completion order does not matter.
        for (index, handle) in handles.into_iter().enumerate().rev() {
            let outcome = handle.await.unwrap();
            assert!(session.apply_thumbnail(generation, index, outcome));
        }

        let slots = session.thumbnails();
        assert!(matches!(slots[0], ThumbnailSlot::Rendered(ref t) if t.width == 200));
        assert!(matches!(slots[1], ThumbnailSlot::Failed(_)));
        assert!(matches!(slots[2], ThumbnailSlot::Rendered(_)));
    }

    #[tokio::test]
    async fn thumbnails_for_a_replaced_document_are_dropped() {
        let mut session = RemovalSession::new();
        let ticket = session.begin_load(pdf_file(2)).unwrap();
        session.complete_load(ticket, Ok(2)).unwrap();
        let old_generation = session.generation();

        let ticket = session.begin_load(pdf_file(4)).unwrap();
        session.complete_load(ticket, Ok(4)).unwrap();

        let renderer: Arc<dyn PageRenderer> = Arc::new(FakeRenderer { fail_on: usize::MAX });
        let outcome = render_thumbnail(renderer, Arc::from(numbered_pdf(2)), 0, 120).await;
        assert!(!session.apply_thumbnail(old_generation, 0, outcome));
        assert_eq!(session.thumbnails()[0], ThumbnailSlot::Pending);
    }

    #[tokio::test]
    async fn panicked_conversion_is_a_conversion_failure() {
        let err = tokio::task::spawn_blocking::<_, ()>(|| panic!("writer blew up"))
            .await
            .unwrap_err();
        assert!(matches!(conversion_panicked(err), ToPdfError::ConversionFailed(_)));
    }

    #[tokio::test]
    async fn garbage_fails_to_count() {
        let result = count_pages_async(Arc::from(b"nope".to_vec())).await;
        assert!(matches!(result, Err(ToPdfError::InvalidDocument(_))));
    }
}
