// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell state shared between the tab bar and the pages.

use topdf_core::ToPdfError;
use topdf_core::human_errors::{HumanError, Severity, humanize_error};

/// The two tools the shell switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Convert,
    RemovePages,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Convert, Tab::RemovePages];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Convert => "Convert to PDF",
            Self::RemovePages => "Remove Pages",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Convert => "\u{1F4C4}",
            Self::RemovePages => "\u{2702}",
        }
    }
}

/// A message shown above a flow after something went wrong (or right).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub detail: Option<String>,
    pub severity: Option<Severity>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: None,
            severity: None,
        }
    }

    pub fn from_error(err: &ToPdfError) -> Self {
        let HumanError {
            message,
            suggestion,
            severity,
        } = humanize_error(err);
        Self {
            text: message,
            detail: Some(suggestion),
            severity: Some(severity),
        }
    }

    /// Text and background colours.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self.severity {
            None => ("#155724", "#d4edda"),
            Some(Severity::Transient) => ("#856404", "#fff3cd"),
            Some(Severity::ActionRequired) => ("#004085", "#e7f3ff"),
            Some(Severity::Permanent) => ("#721c24", "#f8d7da"),
        }
    }
}
