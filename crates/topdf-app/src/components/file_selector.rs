// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File selector: a drop zone that also opens the native file dialog on click.
//
// Files are read fully into memory and filtered through an `AcceptFilter`;
// whatever survives is handed to the owning flow in the order given.

use dioxus::prelude::*;

use topdf_core::{AcceptFilter, SelectedFile};

#[component]
pub fn FileSelector(
    accept: AcceptFilter,
    multiple: bool,
    prompt: String,
    on_files: EventHandler<Vec<SelectedFile>>,
) -> Element {
    let mut dragging = use_signal(|| false);
    let mut rejected = use_signal(|| 0usize);

    // Filter, trim to one file if needed, then hand over.
    let deliver = {
        let accept = accept.clone();
        move |files: Vec<SelectedFile>| {
            let offered = files.len();
            let mut accepted = accept.retain(files);
            if !multiple {
                accepted.truncate(1);
            }
            rejected.set(offered.saturating_sub(accepted.len()));
            if accepted.is_empty() {
                tracing::debug!(offered, "no acceptable files selected");
                return;
            }
            tracing::info!(files = accepted.len(), "files selected");
            on_files.call(accepted);
        }
    };

    let (border, bg) = if *dragging.read() {
        ("#007aff", "#e7f3ff")
    } else {
        ("#9aa5b1", "white")
    };
    let formats = accept.description();

    rsx! {
        div { class: "dropzone",
            style: "padding: 40px 16px; border: 2px dashed {border}; border-radius: 12px; background: {bg}; text-align: center; cursor: pointer;",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: {
                let deliver = deliver.clone();
                move |evt: DragEvent| {
                    evt.prevent_default();
                    dragging.set(false);
                    let mut deliver = deliver.clone();
                    async move {
                        let mut files = Vec::new();
                        for file in evt.files() {
                            let name = file.name();
                            match file.read_bytes().await {
                                Ok(bytes) => files.push(SelectedFile::new(name, file.content_type(), bytes.to_vec())),
                                Err(e) => tracing::warn!(file = %name, error = %e, "failed to read dropped file"),
                            }
                        }
                        deliver(files);
                    }
                }
            },
            onclick: {
                let accept = accept.clone();
                let mut deliver = deliver.clone();
                move |_| {
                    let extensions = accept.dialog_extensions();
                    let dialog = rfd::FileDialog::new().add_filter(accept.description(), &extensions[..]);
                    let paths = if multiple {
                        dialog.pick_files().unwrap_or_default()
                    } else {
                        dialog.pick_file().into_iter().collect()
                    };

                    let mut files = Vec::with_capacity(paths.len());
                    for path in paths {
                        match SelectedFile::from_path(&path) {
                            Ok(file) => {
                                tracing::info!(file = %file.name(), bytes = file.size(), "file loaded");
                                files.push(file);
                            }
                            Err(e) => tracing::error!(path = %path.display(), error = %e, "failed to read file"),
                        }
                    }
                    deliver(files);
                }
            },

            p { style: "font-size: 32px; margin: 0;", "\u{1F4C1}" }
            p { style: "font-size: 16px; color: #333; margin: 8px 0;", "{prompt}" }
            p { style: "font-size: 13px; color: #888; margin: 0;", "Supported formats: {formats}" }
            if *rejected.read() > 0 {
                p { style: "font-size: 13px; color: #b35c00; margin-top: 8px;",
                    "{rejected} file(s) skipped: unsupported format."
                }
            }
        }
    }
}
