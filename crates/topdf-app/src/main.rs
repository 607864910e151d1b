// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ToPDF: convert files to PDF and remove PDF pages, entirely offline.
//
// Entry point. Initialises logging and configuration, then launches the
// Dioxus UI.

mod components;
mod pages;
mod services;
mod state;

use std::sync::Arc;

use dioxus::prelude::*;

use topdf_core::AppConfig;
use topdf_document::{PageRenderer, PdfiumRenderer};

use pages::convert::ConvertPage;
use pages::remove_pages::RemovePagesPage;
use state::Tab;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("ToPDF starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let config = use_hook(AppConfig::load);
    let renderer: Arc<dyn PageRenderer> = use_hook(|| {
        if !PdfiumRenderer::is_available() {
            tracing::warn!("pdfium not found; page previews will be unavailable");
        }
        PdfiumRenderer::shared()
    });

    // Provide configuration and the page renderer to every page
    use_context_provider(|| config.clone());
    use_context_provider(|| renderer.clone());
    let active = use_signal(|| Tab::Convert);

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #f5f7fb;",

            Hero {}

            TabBar { active }

            // Only the active flow is mounted; switching tabs drops the other's state.
            main { class: "page-content",
                style: "flex: 1; width: 100%; max-width: 880px; margin: 0 auto; padding: 16px; box-sizing: border-box;",
                match *active.read() {
                    Tab::Convert => rsx! { ConvertPage {} },
                    Tab::RemovePages => rsx! { RemovePagesPage {} },
                }
            }

            footer {
                style: "text-align: center; padding: 16px; color: #888; font-size: 13px; border-top: 1px solid #e0e0e0;",
                "ToPDF runs entirely on your computer. Your files never leave your device."
            }
        }
    }
}

#[component]
fn Hero() -> Element {
    rsx! {
        header {
            style: "text-align: center; padding: 32px 16px 16px;",
            h1 { style: "margin: 0; font-size: 32px; color: #1f2937;", "ToPDF" }
            p { style: "color: #555; font-size: 16px; margin-top: 8px;",
                "Convert documents and images to PDF, or remove pages from a PDF."
            }
            p { style: "color: #2e7d32; font-size: 14px; margin-top: 4px;",
                "\u{1F512} 100% private: all processing happens locally."
            }
        }
    }
}

#[component]
fn TabBar(active: Signal<Tab>) -> Element {
    rsx! {
        nav { class: "tab-bar",
            style: "display: flex; justify-content: center; gap: 8px; padding: 8px 0;",
            for tab in Tab::ALL {
                TabButton { tab, active }
            }
        }
    }
}

#[component]
fn TabButton(tab: Tab, mut active: Signal<Tab>) -> Element {
    let selected = *active.read() == tab;
    let (bg, fg) = if selected { ("#007aff", "white") } else { ("white", "#333") };

    rsx! {
        button {
            style: "padding: 10px 20px; border-radius: 8px; border: 1px solid #007aff; background: {bg}; color: {fg}; font-size: 15px;",
            onclick: move |_| {
                if *active.read() != tab {
                    tracing::debug!(tab = tab.label(), "switching tab");
                    active.set(tab);
                }
            },
            "{tab.icon()} {tab.label()}"
        }
    }
}
