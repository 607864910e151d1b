// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for ToPDF.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Unique identifier for a selected file.
///
/// Two selections of the same file on disk get different ids, so the
/// pending queue can hold duplicates and still key them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inferred category of a selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileClass {
    Image,
    PlainText,
    WordDocument,
    Pdf,
    Unknown,
}

impl FileClass {
    /// Classify a file from its name and, when available, its MIME type.
    ///
    /// The MIME type wins when present; otherwise it is inferred from the
    /// extension. A `.txt` or `.docx` name is honoured even when the MIME type
    /// is missing or generic (`application/octet-stream`).
    pub fn classify(name: &str, mime: Option<&str>) -> Self {
        let ext = extension_of(name);
        let mime = mime
            .filter(|m| !m.is_empty())
            .map(str::to_ascii_lowercase)
            .or_else(|| ext.as_deref().and_then(mime_from_extension).map(str::to_owned))
            .unwrap_or_default();

        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("text/") || ext.as_deref() == Some("txt") {
            Self::PlainText
        } else if mime.contains("wordprocessingml") || ext.as_deref() == Some("docx") {
            Self::WordDocument
        } else if mime == "application/pdf" || ext.as_deref() == Some("pdf") {
            Self::Pdf
        } else {
            Self::Unknown
        }
    }

    /// Short glyph shown next to a queued file.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Image => "\u{1F5BC}",
            Self::PlainText => "\u{1F4C4}",
            Self::WordDocument => "\u{1F4DD}",
            Self::Pdf => "\u{1F4D5}",
            Self::Unknown => "\u{2753}",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::PlainText => "plain text",
            Self::WordDocument => "Word document",
            Self::Pdf => "PDF",
            Self::Unknown => "unknown",
        }
    }
}

/// Lower-cased extension of a file name, without the dot.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// MIME type for a (lower-case) file extension.
pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "pdf" => Some("application/pdf"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "tif" | "tiff" => Some("image/tiff"),
        "txt" => Some("text/plain"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        _ => None,
    }
}

/// A user-chosen file held in memory for the lifetime of a flow session.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    id: FileId,
    name: String,
    mime: Option<String>,
    class: FileClass,
    data: Arc<[u8]>,
}

impl SelectedFile {
    /// Wrap bytes the caller has already read.
    pub fn new(name: impl Into<String>, mime: Option<String>, data: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let class = FileClass::classify(&name, mime.as_deref());
        Self {
            id: FileId::new(),
            name,
            mime,
            class,
            data: data.into(),
        }
    }

    /// Read a file from disk. The MIME type is left to extension inference.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unnamed".into());
        Ok(Self::new(name, None, bytes))
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn class(&self) -> FileClass {
        self.class
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Size formatted for the queue listing, e.g. `"12.3 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size() as f64 / 1024.0)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the bytes, for moving into background tasks.
    pub fn data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }
}

/// The most recent successful output of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    file_name: String,
    bytes: Arc<[u8]>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Suggested name for the download.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A rendered page preview, PNG-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub png: Arc<[u8]>,
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}
