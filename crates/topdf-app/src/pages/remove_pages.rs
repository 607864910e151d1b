// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Remove Pages page: load a PDF, preview its pages, pick the ones to drop.
//
// The page count comes from lopdf as soon as the file is read. Thumbnails
// are then rendered one task per page and land in their own slots in any
// order; results for a document that has since been replaced are ignored.

use std::sync::Arc;

use dioxus::prelude::*;

use topdf_core::{AcceptFilter, AppConfig, RemovalPhase, RemovalSession, SelectedFile, ThumbnailSlot};
use topdf_document::{PageRenderer, count_pages_async, remove_pages_async, render_thumbnail};

use crate::components::file_selector::FileSelector;
use crate::components::notice::NoticeBanner;
use crate::services::download::save_artifact;
use crate::services::preview::thumbnail_data_uri;
use crate::state::Notice;

#[component]
pub fn RemovePagesPage() -> Element {
    let config = use_context::<AppConfig>();
    let renderer = use_context::<Arc<dyn PageRenderer>>();
    let mut session = use_signal({
        let prefix = config.modified_prefix.clone();
        move || RemovalSession::with_output_prefix(prefix)
    });
    let mut notice = use_signal(|| Option::<Notice>::None);

    let thumbnail_width = config.thumbnail_width_px;
    let mut load = move |file: SelectedFile| {
        let data = file.data();
        let ticket = match session.write().begin_load(file) {
            Ok(ticket) => ticket,
            Err(e) => {
                notice.set(Some(Notice::from_error(&e)));
                return;
            }
        };
        notice.set(None);
        let renderer = renderer.clone();

        spawn(async move {
            let count = count_pages_async(data.clone()).await;
            let loaded = session.write().complete_load(ticket, count);
            match loaded {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    tracing::error!(error = %e, "failed to load PDF");
                    notice.set(Some(Notice::from_error(&e)));
                    return;
                }
            }

            let (generation, page_count) = {
                let current = session.read();
                (current.generation(), current.page_count())
            };
            for index in 0..page_count {
                let renderer = renderer.clone();
                let data = data.clone();
                spawn(async move {
                    let outcome = render_thumbnail(renderer, data, index, thumbnail_width).await;
                    session.write().apply_thumbnail(generation, index, outcome);
                });
            }
        });
    };

    let phase = session.read().phase();

    rsx! {
        div {
            h2 { "Remove Pages" }
            p { style: "color: #666;", "Upload a PDF, click the pages you want to remove, then download the result." }

            if let Some(current) = notice.read().clone() {
                NoticeBanner { notice: current, on_dismiss: move |_| notice.set(None) }
            }

            match phase {
                RemovalPhase::NoFile => rsx! {
                    FileSelector {
                        accept: AcceptFilter::pdf_only(),
                        multiple: false,
                        prompt: "Drag & drop a PDF here, or click to select".to_string(),
                        on_files: move |files: Vec<SelectedFile>| {
                            if let Some(file) = files.into_iter().next() {
                                load(file);
                            }
                        },
                    }
                },
                RemovalPhase::Loading => rsx! {
                    div { style: "text-align: center; padding: 48px 0; color: #555;",
                        p { style: "font-size: 28px; margin: 0;", "\u{23F3}" }
                        p { "Loading PDF..." }
                    }
                },
                RemovalPhase::Loaded | RemovalPhase::Processing | RemovalPhase::Ready => rsx! {
                    DocumentView { session, notice }
                },
            }
        }
    }
}

/// Header, page grid and actions for a loaded document.
#[component]
fn DocumentView(mut session: Signal<RemovalSession>, mut notice: Signal<Option<Notice>>) -> Element {
    let current = session.read();
    let name = current.document().map(|f| f.name().to_string()).unwrap_or_default();
    let page_count = current.page_count();
    let selected = current.selected_count();
    let phase = current.phase();
    let slots: Vec<(usize, ThumbnailSlot, bool)> = current
        .thumbnails()
        .iter()
        .enumerate()
        .map(|(i, slot)| (i, slot.clone(), current.is_selected(i)))
        .collect();
    drop(current);

    let processing = phase == RemovalPhase::Processing;
    let plural = if selected == 1 { "" } else { "s" };

    rsx! {
        div {
            // Header
            div { style: "display: flex; align-items: center; gap: 12px; margin: 16px 0;",
                div { style: "flex: 1; min-width: 0;",
                    h3 { style: "margin: 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{name}" }
                    p { style: "margin: 4px 0 0; color: #666;", "{page_count} pages \u{2022} Select pages to remove" }
                }
                button {
                    style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    disabled: processing,
                    onclick: move |_| {
                        notice.set(None);
                        session.write().reset();
                    },
                    "Upload different file"
                }
            }

            // Page grid
            div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 12px;",
                for (index, slot, is_selected) in slots {
                    PageCard {
                        key: "{index}",
                        index,
                        slot,
                        selected: is_selected,
                        on_toggle: move |index: usize| {
                            if let Err(e) = session.write().toggle_page(index) {
                                tracing::warn!(error = %e, "page toggle rejected");
                            }
                        },
                    }
                }
            }

            // Actions: a finished result replaces the remove button until the
            // selection changes.
            div { style: "display: flex; gap: 8px; margin-top: 16px;",
                if phase == RemovalPhase::Ready {
                    button {
                        style: "flex: 1; padding: 16px; border-radius: 12px; border: none; background: #2e7d32; color: white; font-size: 18px; font-weight: bold;",
                        onclick: move |_| {
                            let Some(artifact) = session.read().artifact().cloned() else {
                                return;
                            };
                            match save_artifact(&artifact) {
                                Ok(Some(path)) => notice.set(Some(Notice::info(format!("Saved to {}", path.display())))),
                                Ok(None) => {}
                                Err(e) => {
                                    tracing::error!(error = %e, "download failed");
                                    notice.set(Some(Notice::from_error(&e)));
                                }
                            }
                        },
                        "\u{2B07} Download Modified PDF"
                    }
                } else {
                    button {
                        style: "flex: 1; padding: 16px; border-radius: 12px; border: none; background: #d32f2f; color: white; font-size: 18px; font-weight: bold;",
                        disabled: selected == 0 || processing,
                        onclick: move |_| {
                            let request = match session.write().begin_removal() {
                                Ok(request) => request,
                                Err(e) => {
                                    notice.set(Some(Notice::from_error(&e)));
                                    return;
                                }
                            };
                            notice.set(None);

                            spawn(async move {
                                let outcome = remove_pages_async(request.source.data(), request.indices).await;
                                let applied = session.write().finish_removal(request.generation, outcome);
                                if let Err(e) = applied {
                                    tracing::error!(error = %e, "page removal failed");
                                    notice.set(Some(Notice::from_error(&e)));
                                }
                            });
                        },
                        if processing {
                            "Removing pages..."
                        } else {
                            "Remove {selected} Selected Page{plural}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PageCard(index: usize, slot: ThumbnailSlot, selected: bool, on_toggle: EventHandler<usize>) -> Element {
    let (border, overlay) = if selected {
        ("3px solid #d32f2f", "opacity: 0.45;")
    } else {
        ("1px solid #ccc", "")
    };
    let number = index + 1;

    rsx! {
        div {
            style: "position: relative; border: {border}; border-radius: 8px; background: white; padding: 6px; cursor: pointer; text-align: center;",
            onclick: move |_| on_toggle.call(index),
            div { style: "height: 180px; display: flex; align-items: center; justify-content: center; background: #f0f0f0; border-radius: 4px; overflow: hidden; {overlay}",
                match slot {
                    ThumbnailSlot::Rendered(ref thumbnail) => rsx! {
                        img {
                            src: thumbnail_data_uri(thumbnail),
                            alt: "Page {number}",
                            style: "max-width: 100%; max-height: 100%;",
                        }
                    },
                    ThumbnailSlot::Pending => rsx! {
                        span { style: "color: #aaa; font-size: 12px;", "Loading..." }
                    },
                    ThumbnailSlot::Failed(_) => rsx! {
                        span { style: "color: #aaa; font-size: 12px;", "Preview unavailable" }
                    },
                }
            }
            if selected {
                span { style: "position: absolute; top: 8px; right: 8px; background: #d32f2f; color: white; border-radius: 50%; width: 24px; height: 24px; line-height: 24px; font-size: 14px;",
                    "\u{2715}"
                }
            }
            p { style: "margin: 6px 0 0; font-size: 13px; color: #333;", "Page {number}" }
        }
    }
}
