// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Convert page: queue documents and images, merge them into one PDF, download.

use dioxus::prelude::*;

use topdf_core::{AcceptFilter, AppConfig, ConvertPhase, ConvertSession};
use topdf_document::{ConvertOptions, convert_files_async};

use crate::components::file_selector::FileSelector;
use crate::components::notice::NoticeBanner;
use crate::services::download::save_artifact;
use crate::state::Notice;

#[component]
pub fn ConvertPage() -> Element {
    let config = use_context::<AppConfig>();
    let mut session = use_signal(ConvertSession::new);
    let mut notice = use_signal(|| Option::<Notice>::None);

    let phase = session.read().phase();
    let queued = session.read().files().len();

    rsx! {
        div {
            h2 { "Convert to PDF" }
            p { style: "color: #666;",
                "Add Word documents, text files and images. Each file starts on a new page, in the order listed."
            }

            FileSelector {
                accept: AcceptFilter::documents(),
                multiple: true,
                prompt: "Drag & drop files here, or click to select".to_string(),
                on_files: move |files| {
                    notice.set(None);
                    session.write().add_files(files);
                },
            }

            if let Some(current) = notice.read().clone() {
                NoticeBanner { notice: current, on_dismiss: move |_| notice.set(None) }
            }

            // Queue
            if queued > 0 {
                section { style: "margin: 16px 0;",
                    h3 { "Files ({queued})" }
                    ul { style: "list-style: none; padding: 0; margin: 0;",
                        for (i, file) in session.read().files().iter().enumerate() {
                            li { key: "{file.id()}",
                                style: "display: flex; align-items: center; gap: 12px; padding: 10px 12px; margin-bottom: 6px; background: white; border: 1px solid #e0e0e0; border-radius: 8px;",
                                span { style: "font-size: 20px;", "{file.class().icon()}" }
                                div { style: "flex: 1; min-width: 0;",
                                    p { style: "margin: 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{file.name()}" }
                                    p { style: "margin: 0; color: #888; font-size: 12px;",
                                        "{file.size_label()} \u{2022} {file.class().label()}"
                                    }
                                }
                                button {
                                    style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                                    disabled: phase == ConvertPhase::Converting,
                                    onclick: move |_| {
                                        session.write().remove_file(i);
                                    },
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }

            // Convert / download
            match phase {
                ConvertPhase::Empty => rsx! {},
                ConvertPhase::Staged | ConvertPhase::Converting => rsx! {
                    button {
                        style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #007aff; color: white; font-size: 18px; font-weight: bold; margin-top: 8px;",
                        disabled: phase == ConvertPhase::Converting,
                        onclick: {
                            let config = config.clone();
                            move |_| {
                                let (ticket, files) = match session.write().begin_convert() {
                                    Ok(started) => started,
                                    Err(e) => {
                                        notice.set(Some(Notice::from_error(&e)));
                                        return;
                                    }
                                };
                                notice.set(None);
                                let options = ConvertOptions::from_config(&config);

                                spawn(async move {
                                    let outcome = convert_files_async(files, options).await;
                                    let applied = session.write().finish_convert(ticket, outcome);
                                    match applied {
                                        Ok(true) => tracing::info!("converted PDF ready"),
                                        Ok(false) => tracing::debug!("conversion superseded by a queue edit"),
                                        Err(e) => {
                                            tracing::error!(error = %e, "conversion failed");
                                            notice.set(Some(Notice::from_error(&e)));
                                        }
                                    }
                                });
                            }
                        },
                        if phase == ConvertPhase::Converting { "Converting..." } else { "Convert to PDF" }
                    }
                },
                ConvertPhase::Ready => rsx! {
                    button {
                        style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #2e7d32; color: white; font-size: 18px; font-weight: bold; margin-top: 8px;",
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
                        "\u{2B07} Download PDF"
                    }
                },
            }
        }
    }
}
