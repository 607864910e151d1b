// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Convert flow session: a queue of pending files and at most one artifact.

use tracing::{debug, info, warn};

use crate::error::{Result, ToPdfError};
use crate::types::{Artifact, SelectedFile};

/// Where the convert flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    /// No files queued.
    Empty,
    /// Files queued, no artifact.
    Staged,
    /// A conversion is in flight.
    Converting,
    /// An artifact is available for download.
    Ready,
}

/// Proof that a conversion was started against a particular queue revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertTicket {
    revision: u64,
}

/// State of the convert flow.
#[derive(Debug, Clone, Default)]
pub struct ConvertSession {
    queue: Vec<SelectedFile>,
    artifact: Option<Artifact>,
    converting: bool,
    /// Bumped on every queue edit; results from older revisions are stale.
    revision: u64,
}

impl ConvertSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ConvertPhase {
        if self.converting {
            ConvertPhase::Converting
        } else if self.artifact.is_some() {
            ConvertPhase::Ready
        } else if self.queue.is_empty() {
            ConvertPhase::Empty
        } else {
            ConvertPhase::Staged
        }
    }

    /// Queued files in selection order.
    pub fn files(&self) -> &[SelectedFile] {
        &self.queue
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Append newly selected files. Duplicates are allowed.
    pub fn add_files(&mut self, files: Vec<SelectedFile>) {
        if files.is_empty() {
            return;
        }
        debug!(added = files.len(), queued = self.queue.len(), "queueing files");
        self.queue.extend(files);
        self.invalidate();
    }

    /// Remove the file at `index`, returning it. Out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.queue.len() {
            warn!(index, queued = self.queue.len(), "remove_file index out of range");
            return None;
        }
        let removed = self.queue.remove(index);
        self.invalidate();
        Some(removed)
    }

    /// Discard the artifact and any in-flight result after an input edit.
    pub fn invalidate(&mut self) {
        self.revision += 1;
        self.converting = false;
        if self.artifact.take().is_some() {
            debug!("discarded stale conversion artifact");
        }
    }

    /// Drop everything and return to `Empty`.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.invalidate();
    }

    /// Enter `Converting` and hand back a snapshot of the queue to convert.
    pub fn begin_convert(&mut self) -> Result<(ConvertTicket, Vec<SelectedFile>)> {
        if self.queue.is_empty() {
            return Err(ToPdfError::EmptyInput);
        }
        self.artifact = None;
        self.converting = true;
        info!(files = self.queue.len(), "conversion started");
        Ok((
            ConvertTicket {
                revision: self.revision,
            },
            self.queue.clone(),
        ))
    }

    /// Apply the outcome of a conversion.
    ///
    /// Returns `Ok(true)` when the artifact was installed and `Ok(false)` when
    /// the queue changed since `begin_convert` and the outcome was dropped.
    /// A current failure returns the session to `Staged` and is passed back.
    pub fn finish_convert(
        &mut self,
        ticket: ConvertTicket,
        outcome: Result<Artifact>,
    ) -> Result<bool> {
        if ticket.revision != self.revision || !self.converting {
            debug!(
                ticket = ticket.revision,
                current = self.revision,
                "dropping stale conversion result"
            );
            return Ok(false);
        }
        self.converting = false;
        let artifact = outcome?;
        info!(bytes = artifact.len(), name = artifact.file_name(), "conversion ready");
        self.artifact = Some(artifact);
        Ok(true)
    }
}
