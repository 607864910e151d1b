// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rendering: rasterise single PDF pages into PNG thumbnails.
//
// The `PageRenderer` trait is the seam between the removal flow and the
// rasteriser. `PdfiumRenderer` binds the pdfium shared library at call time,
// so a machine without pdfium still loads documents and removes pages; only
// the previews fail.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};
use pdfium_render::prelude::*;
use topdf_core::Thumbnail;
use topdf_core::error::{Result, ToPdfError};
use tracing::{debug, instrument};

/// Rasterises pages of a PDF held in memory.
///
/// Implementations are blocking and must be called off the UI thread.
pub trait PageRenderer: Send + Sync {
    /// Render page `index` (zero-based) scaled to `target_width` pixels.
    fn render_page(&self, pdf: &[u8], index: usize, target_width: u32) -> Result<Thumbnail>;
}

/// [`PageRenderer`] backed by pdfium.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfiumRenderer;

impl PdfiumRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Bind pdfium, preferring a library next to the executable over the
    /// system-wide one.
    pub fn bind() -> Result<Pdfium> {
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map(Pdfium::new)
            .map_err(|e| ToPdfError::RenderError(format!("pdfium library unavailable: {e:?}")))
    }

    /// Whether pdfium can be bound on this machine.
    pub fn is_available() -> bool {
        Self::bind().is_ok()
    }

    pub fn shared() -> Arc<dyn PageRenderer> {
        Arc::new(Self)
    }
}

impl PageRenderer for PdfiumRenderer {
    #[instrument(skip(self, pdf), fields(bytes_len = pdf.len()))]
    fn render_page(&self, pdf: &[u8], index: usize, target_width: u32) -> Result<Thumbnail> {
        let pdfium = Self::bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| ToPdfError::InvalidDocument(format!("{e:?}")))?;

        let pages = document.pages();
        let page_count = pages.len() as usize;
        if index >= page_count {
            return Err(ToPdfError::PageOutOfRange { index, page_count });
        }

        let page = pages
            .get(index as u16)
            .map_err(|e| ToPdfError::RenderError(format!("page {}: {e:?}", index + 1)))?;

        let render_config = PdfRenderConfig::new().set_target_width(target_width.max(1) as i32);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| ToPdfError::RenderError(format!("page {}: {e:?}", index + 1)))?;

        let image = bitmap.as_image();
        debug!(
            page = index + 1,
            width = image.width(),
            height = image.height(),
            "Rendered page"
        );
        encode_thumbnail(&image)
    }
}

/// Encode a rendered page as a PNG thumbnail.
pub fn encode_thumbnail(image: &DynamicImage) -> Result<Thumbnail> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ToPdfError::RenderError(format!("PNG encoding failed: {e}")))?;
    Ok(Thumbnail {
        width: image.width(),
        height: image.height(),
        png: buffer.into_inner().into(),
    })
}
