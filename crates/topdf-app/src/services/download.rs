// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download service: hand an artifact to the user through a native save dialog.

use std::path::{Path, PathBuf};

use topdf_core::Artifact;
use topdf_core::error::Result;
use tracing::{info, instrument};

/// Ask where to save `artifact` and write it there.
///
/// Returns the chosen path, or `None` if the user cancelled the dialog.
pub fn save_artifact(artifact: &Artifact) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(artifact.file_name())
        .add_filter("PDF document", &["pdf"])
        .save_file()
    else {
        info!(file = artifact.file_name(), "download cancelled");
        return Ok(None);
    };

    write_artifact(&path, artifact)?;
    Ok(Some(path))
}

/// Write the artifact bytes to `path` in one call, closing the file immediately.
#[instrument(skip(artifact), fields(bytes_len = artifact.len()))]
pub fn write_artifact(path: &Path, artifact: &Artifact) -> Result<()> {
    std::fs::write(path, artifact.bytes())?;
    info!(path = %path.display(), "artifact saved");
    Ok(())
}
