// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the UI presents the message.

use crate::error::ToPdfError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something went wrong that may work on a second attempt.
    Transient,
    /// The user must do something differently (pick pages, pick a PDF).
    ActionRequired,
    /// The input cannot be used as-is.
    Permanent,
}

/// A human-readable error with a plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives colour in the UI).
    pub severity: Severity,
}

/// Convert a `ToPdfError` into a `HumanError`.
pub fn humanize_error(err: &ToPdfError) -> HumanError {
    match err {
        ToPdfError::EmptyInput => HumanError {
            message: "There is nothing to convert yet.".into(),
            suggestion: "Add at least one file first.".into(),
            severity: Severity::ActionRequired,
        },

        ToPdfError::UnsupportedInput(detail) => HumanError {
            message: "This type of file isn't supported.".into(),
            suggestion: format!("Use a DOCX, TXT, JPG or PNG file instead. ({detail})"),
            severity: Severity::Permanent,
        },

        ToPdfError::Decode { name, .. } => HumanError {
            message: format!("We couldn't read {name}."),
            suggestion: "The file may be damaged or saved in a different encoding.".into(),
            severity: Severity::Permanent,
        },

        ToPdfError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            severity: Severity::Permanent,
        },

        ToPdfError::DocxError(_) => HumanError {
            message: "We couldn't read this Word document.".into(),
            suggestion: "Make sure it is a .docx file (not the older .doc format) and opens in a word processor.".into(),
            severity: Severity::Permanent,
        },

        ToPdfError::ConversionFailed(_) => HumanError {
            message: "Conversion failed.".into(),
            suggestion: "Something went wrong while building the PDF. Please try converting again.".into(),
            severity: Severity::Transient,
        },

        ToPdfError::InvalidDocument(_) => HumanError {
            message: "Please upload a valid PDF file.".into(),
            suggestion: "The file isn't a PDF or couldn't be opened. Try another file.".into(),
            severity: Severity::ActionRequired,
        },

        ToPdfError::PdfError(_) => HumanError {
            message: "Failed to remove pages.".into(),
            suggestion: "The PDF may be damaged. Try opening it in a PDF viewer first, or try a different file.".into(),
            severity: Severity::Transient,
        },

        ToPdfError::PageOutOfRange { index, page_count } => HumanError {
            message: format!("Page {} doesn't exist.", index + 1),
            suggestion: format!("This document only has {page_count} pages."),
            severity: Severity::ActionRequired,
        },

        ToPdfError::EmptySelection => HumanError {
            message: "No pages selected.".into(),
            suggestion: "Click the pages you want to remove, then try again.".into(),
            severity: Severity::ActionRequired,
        },

        ToPdfError::EmptyResult(_) => HumanError {
            message: "You can't remove every page.".into(),
            suggestion: "Leave at least one page unselected.".into(),
            severity: Severity::ActionRequired,
        },

        ToPdfError::RenderError(_) => HumanError {
            message: "A page preview couldn't be drawn.".into(),
            suggestion: "You can still select and remove pages without the preview.".into(),
            severity: Severity::Transient,
        },

        ToPdfError::Config(detail) => HumanError {
            message: "The settings file has a problem.".into(),
            suggestion: format!("Default settings are used instead. ({detail})"),
            severity: Severity::Permanent,
        },

        ToPdfError::Io(io_err) => humanize_io_error(io_err),

        ToPdfError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Check that it is valid JSON.".into(),
            severity: Severity::Permanent,
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Pick it again.".into(),
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "Permission denied.".into(),
            suggestion: "Choose a folder you are allowed to write to.".into(),
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "Reading or writing the file failed.".into(),
            suggestion: format!("Try again. ({err})"),
            severity: Severity::Transient,
        },
    }
}
