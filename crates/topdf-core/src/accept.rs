// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Accept filters for the file selector.
//
// Patterns use the same comma-separated syntax as an HTML `accept` attribute:
// `.ext` entries match by extension, `type/subtype` entries match by MIME type
// and `type/*` entries match a whole MIME family. Matching is purely
// name/MIME based; whether the bytes are actually decodable is left to the
// consuming flow.

use tracing::debug;

use crate::types::{SelectedFile, extension_of, mime_from_extension};

/// Default allowlist for the convert flow.
pub const DEFAULT_ACCEPT: &str = ".docx,.txt,.jpg,.jpeg,.png";

/// Allowlist for the page-removal flow.
pub const PDF_ONLY: &str = ".pdf";

/// Extensions offered in the native file dialog for `image/*`.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    /// Lower-case extension without the leading dot.
    Extension(String),
    /// Exact MIME type.
    Mime(String),
    /// MIME family prefix, e.g. `image/`.
    MimeFamily(String),
}

/// A parsed allowlist of extensions and MIME patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    patterns: Vec<Pattern>,
}

impl AcceptFilter {
    /// Parse an accept string. Blank entries are ignored; an empty filter
    /// accepts everything.
    pub fn parse(spec: &str) -> Self {
        let patterns = spec
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .map(|p| {
                if let Some(ext) = p.strip_prefix('.') {
                    Pattern::Extension(ext.to_string())
                } else if let Some(family) = p.strip_suffix("/*") {
                    Pattern::MimeFamily(format!("{family}/"))
                } else if p.contains('/') {
                    Pattern::Mime(p)
                } else {
                    Pattern::Extension(p)
                }
            })
            .collect();
        Self { patterns }
    }

    /// Documents and images accepted by the convert flow.
    pub fn documents() -> Self {
        Self::parse(DEFAULT_ACCEPT)
    }

    /// PDF files only.
    pub fn pdf_only() -> Self {
        Self::parse(PDF_ONLY)
    }

    /// Whether a file with this name and optional MIME type is accepted.
    pub fn matches(&self, name: &str, mime: Option<&str>) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let ext = extension_of(name);
        let mime = mime
            .filter(|m| !m.is_empty())
            .map(str::to_ascii_lowercase)
            .or_else(|| ext.as_deref().and_then(mime_from_extension).map(str::to_owned));

        self.patterns.iter().any(|pattern| match pattern {
            Pattern::Extension(e) => ext.as_deref() == Some(e.as_str()),
            Pattern::Mime(m) => mime.as_deref() == Some(m.as_str()),
            Pattern::MimeFamily(prefix) => mime.as_deref().is_some_and(|m| m.starts_with(prefix.as_str())),
        })
    }

    /// Keep the accepted files, preserving their order.
    pub fn retain(&self, files: Vec<SelectedFile>) -> Vec<SelectedFile> {
        files
            .into_iter()
            .filter(|file| {
                let accepted = self.matches(file.name(), file.mime());
                if !accepted {
                    debug!(file = %file.name(), "rejected by accept filter");
                }
                accepted
            })
            .collect()
    }

    /// Extensions (without dots) for a native file dialog filter.
    pub fn dialog_extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = Vec::new();
        for pattern in &self.patterns {
            let candidates: Vec<String> = match pattern {
                Pattern::Extension(e) => vec![e.clone()],
                Pattern::Mime(m) => IMAGE_EXTENSIONS
                    .iter()
                    .chain(["pdf", "txt", "docx"].iter())
                    .filter(|e| mime_from_extension(e) == Some(m.as_str()))
                    .map(|e| e.to_string())
                    .collect(),
                Pattern::MimeFamily(prefix) if prefix == "image/" => {
                    IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
                }
                Pattern::MimeFamily(prefix) if prefix == "text/" => vec!["txt".into()],
                Pattern::MimeFamily(_) => Vec::new(),
            };
            for candidate in candidates {
                if !exts.contains(&candidate) {
                    exts.push(candidate);
                }
            }
        }
        exts
    }

    /// Human-readable list of formats, e.g. `"DOCX, TXT, JPG, JPEG, PNG"`.
    pub fn description(&self) -> String {
        self.dialog_extensions()
            .iter()
            .map(|e| e.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for AcceptFilter {
    fn default() -> Self {
        Self::documents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_accepts_documents_and_images() {
        let filter = AcceptFilter::documents();
        assert!(filter.matches("notes.txt", None));
        assert!(filter.matches("report.DOCX", None));
        assert!(filter.matches("photo.jpeg", None));
        assert!(!filter.matches("paper.pdf", None));
        assert!(!filter.matches("archive.zip", None));
    }

    #[test]
    fn pdf_only_filter() {
        let filter = AcceptFilter::pdf_only();
        assert!(filter.matches("paper.pdf", None));
        assert!(!filter.matches("photo.png", Some("image/png")));
    }

    #[test]
    fn mime_patterns_match() {
        let filter = AcceptFilter::parse("image/*, application/pdf");
        assert!(filter.matches("scan", Some("image/webp")));
        assert!(filter.matches("photo.gif", None));
        assert!(filter.matches("blob", Some("application/pdf")));
        assert!(!filter.matches("notes.txt", None));
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let filter = AcceptFilter::parse(" , ");
        assert!(filter.matches("anything.bin", None));
    }

    #[test]
    fn retain_preserves_order_and_drops_rejected() {
        let filter = AcceptFilter::documents();
        let files = vec![
            SelectedFile::new("b.txt", None, vec![1u8]),
            SelectedFile::new("skip.exe", None, vec![2u8]),
            SelectedFile::new("a.png", None, vec![3u8]),
        ];
        let kept: Vec<String> = filter
            .retain(files)
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(kept, vec!["b.txt", "a.png"]);
    }

    #[test]
    fn dialog_extensions_and_description() {
        let filter = AcceptFilter::documents();
        assert_eq!(filter.dialog_extensions(), vec!["docx", "txt", "jpg", "jpeg", "png"]);
        assert_eq!(filter.description(), "DOCX, TXT, JPG, JPEG, PNG");

        let images = AcceptFilter::parse("image/*");
        assert!(images.dialog_extensions().contains(&"webp".to_string()));
    }
}
