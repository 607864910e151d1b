// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: build one multi-page PDF from images and text using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. The writer keeps one op list per page and only turns
// them into `PdfPage`s in `finish`, which is what makes `rollback` cheap.
//
// Layout works in millimetres measured from the top-left corner of the page,
// and converts to PDF points (origin bottom-left) when emitting ops.

use image::{DynamicImage, Rgb, RgbImage};
use printpdf::{
    BuiltinFont, DictItem, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, XObjectTransform,
};
use topdf_core::error::{Result, ToPdfError};
use topdf_core::{AppConfig, PaperSize};
use tracing::{debug, instrument};

use super::font::{char_width_mm, encode_win_ansi};

/// Resolution images are declared at; the placement scale compensates.
const IMAGE_DPI: f32 = 150.0;

/// Geometry shared by every page of a converted document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub paper_size: PaperSize,
    pub margin_mm: f32,
    pub content_width_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
}

impl PageLayout {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            paper_size: config.paper_size,
            margin_mm: config.margin_mm,
            content_width_mm: config.content_width_mm,
            line_height_mm: config.line_height_mm,
            font_size_pt: config.font_size_pt,
        }
    }

    /// Page width and height in millimetres.
    pub fn page_mm(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_mm();
        (w as f32, h as f32)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Marker for undoing everything written after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pages: usize,
    ops: usize,
}

/// Where an image ended up on its page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Builds a single PDF page by page.
pub struct PdfWriter {
    doc: PdfDocument,
    layout: PageLayout,
    pages: Vec<Vec<Op>>,
}

impl PdfWriter {
    /// Create an empty document. No page exists until one is started or
    /// something is written.
    pub fn new(title: &str, layout: PageLayout) -> Self {
        Self {
            doc: PdfDocument::new(title),
            layout,
            pages: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a blank page and make it current.
    pub fn start_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn current_ops(&mut self) -> &mut Vec<Op> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pages: self.pages.len(),
            ops: self.pages.last().map_or(0, Vec::len),
        }
    }

    /// Drop every page and op added since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.pages.truncate(checkpoint.pages);
        if let Some(last) = self.pages.last_mut() {
            last.truncate(checkpoint.ops);
        }
    }

    // -- Images ---------------------------------------------------------------

    /// Decode `image_bytes` and place it on the current page, scaled to fit
    /// inside the margins with its aspect ratio preserved.
    #[instrument(skip(self, image_bytes), fields(bytes_len = image_bytes.len()))]
    pub fn place_image(&mut self, image_bytes: &[u8]) -> Result<ImagePlacement> {
        let dynamic_image = ::image::load_from_memory(image_bytes).map_err(|err| {
            ToPdfError::ImageError(format!("failed to decode image for PDF: {}", err))
        })?;

        let img_width = dynamic_image.width();
        let img_height = dynamic_image.height();
        let (width_mm, height_mm) = fit_within(img_width, img_height, &self.layout);

        let rgb_image = flatten_onto_white(&dynamic_image);
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: img_width as usize,
            height: img_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        let (_, page_h_mm) = self.layout.page_mm();
        let margin = self.layout.margin_mm;

        // Native size at IMAGE_DPI, then scale to the fitted box.
        let native_w_pt = img_width as f32 / IMAGE_DPI * 72.0;
        let native_h_pt = img_height as f32 / IMAGE_DPI * 72.0;
        let scale_x = Mm(width_mm).into_pt().0 / native_w_pt;
        let scale_y = Mm(height_mm).into_pt().0 / native_h_pt;

        // Anchored at the top-left margin; PDF y grows upwards.
        let translate_x = Mm(margin).into_pt();
        let translate_y = Mm(page_h_mm - margin - height_mm).into_pt();

        self.current_ops().push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(translate_x),
                translate_y: Some(translate_y),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        });

        debug!(img_width, img_height, width_mm, height_mm, "Image placed on page");

        Ok(ImagePlacement {
            x_mm: margin,
            y_mm: margin,
            width_mm,
            height_mm,
        })
    }

    // -- Text -----------------------------------------------------------------

    /// Wrap `text` to the content width and lay it out from the top margin of
    /// the current page, breaking onto new pages as needed. Returns the number
    /// of lines written.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn write_text(&mut self, text: &str) -> usize {
        let lines = wrap_text_to_width(
            text,
            self.layout.content_width_mm,
            self.layout.font_size_pt,
        );
        let positions = line_positions(lines.len(), &self.layout);

        let mut current_offset = 0;
        for (line, (page_offset, y_mm)) in lines.iter().zip(positions) {
            while current_offset < page_offset {
                self.start_page();
                current_offset += 1;
            }
            self.write_line(line, y_mm);
        }

        debug!(
            total_lines = lines.len(),
            pages = current_offset + 1,
            "Text layout complete"
        );
        lines.len()
    }

    /// Write one line at the left margin, `y_mm` below the top edge. Blank
    /// lines only take up their slot.
    ///
    /// printpdf writes built-in font text as UTF-8, which viewers misread
    /// under the font's WinAnsi encoding, so the `Tj` is emitted directly with
    /// WinAnsi bytes. The empty builtin-font write only registers Helvetica in
    /// the page resources.
    pub fn write_line(&mut self, text: &str, y_mm: f32) {
        if text.is_empty() {
            return;
        }
        let (_, page_h_mm) = self.layout.page_mm();
        let x = Mm(self.layout.margin_mm).into_pt();
        let y = Mm(page_h_mm - y_mm).into_pt();
        let size = Pt(self.layout.font_size_pt);

        let ops = self.current_ops();
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point { x, y },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size,
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::Unknown {
            key: "Tj".to_string(),
            value: vec![DictItem::String {
                data: encode_win_ansi(text),
                literal: false,
            }],
        });
        ops.push(Op::EndTextSection);
    }

    /// Write a single line at the top margin of the current page.
    pub fn write_placeholder(&mut self, text: &str) {
        let y = self.layout.margin_mm;
        self.write_line(text, y);
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the document. An untouched writer yields one blank page.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let (w_mm, h_mm) = self.layout.page_mm();
        let pages: Vec<PdfPage> = self
            .pages
            .into_iter()
            .map(|ops| PdfPage::new(Mm(w_mm), Mm(h_mm), ops))
            .collect();
        self.doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        // Raw operators are only serialised with `secure` off.
        let options = PdfSaveOptions {
            secure: false,
            ..Default::default()
        };
        let output = self.doc.save(&options, &mut warnings);
        debug!(
            pages = self.doc.pages.len(),
            warnings = warnings.len(),
            output_bytes = output.len(),
            "PDF serialised"
        );
        output
    }
}

// -- Layout helpers -----------------------------------------------------------

/// Composite `image` over a white background and drop its alpha channel.
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Size (width, height) in millimetres of an image scaled to the page width
/// minus margins, shrunk further if that would overflow the page height.
pub fn fit_within(img_width: u32, img_height: u32, layout: &PageLayout) -> (f32, f32) {
    let (page_w, page_h) = layout.page_mm();
    let max_w = page_w - 2.0 * layout.margin_mm;
    let max_h = page_h - 2.0 * layout.margin_mm;
    let ratio = img_width.max(1) as f32 / img_height.max(1) as f32;

    let mut w = max_w;
    let mut h = w / ratio;
    if h > max_h {
        h = max_h;
        w = h * ratio;
    }
    (w, h)
}

/// Page offset (relative to the page the text starts on) and baseline in
/// millimetres from the top edge, for each of `line_count` lines.
///
/// The cursor starts at the top margin and advances by the line height; a new
/// page starts whenever the cursor has passed the bottom margin.
pub fn line_positions(line_count: usize, layout: &PageLayout) -> Vec<(usize, f32)> {
    let (_, page_h) = layout.page_mm();
    let limit = page_h - layout.margin_mm;

    let mut positions = Vec::with_capacity(line_count);
    let mut page = 0;
    let mut y = layout.margin_mm;
    for _ in 0..line_count {
        if y > limit {
            page += 1;
            y = layout.margin_mm;
        }
        positions.push((page, y));
        y += layout.line_height_mm;
    }
    positions
}

/// Wrap `text` so that no line is wider than `width_mm` when set in Helvetica
/// at `font_size_pt`.
///
/// Splits on existing newlines first, then performs simple word-wrap within each
/// paragraph. Words wider than the line are force-broken on character
/// boundaries. Tabs become four spaces and carriage returns are dropped.
pub fn wrap_text_to_width(text: &str, width_mm: f32, font_size_pt: f32) -> Vec<String> {
    wrap_measured(text, width_mm, |c| char_width_mm(c, font_size_pt))
}

fn wrap_measured(text: &str, max_width: f32, char_width: impl Fn(char) -> f32) -> Vec<String> {
    let measure = |s: &str| s.chars().map(&char_width).sum::<f32>();
    let space_width = char_width(' ');
    let mut result = Vec::new();

    let normalised = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', "    ");
    for paragraph in normalised.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0.0f32;

        for word in words {
            let word_width = measure(word);
            if word_width > max_width {
                // Flush any accumulated line.
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                // Force-break the oversized word; every chunk keeps at least one char.
                current_width = 0.0;
                for c in word.chars() {
                    let w = char_width(c);
                    if !current_line.is_empty() && current_width + w > max_width {
                        result.push(std::mem::take(&mut current_line));
                        current_width = 0.0;
                    }
                    current_line.push(c);
                    current_width += w;
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_width = word_width;
            } else if current_width + space_width + word_width <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += space_width + word_width;
            } else {
                result.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_width = word_width;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    // A trailing newline should not produce a trailing blank line.
    while result.last().is_some_and(String::is_empty) {
        result.pop();
    }
    result
}
