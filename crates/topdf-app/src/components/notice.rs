// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use dioxus::prelude::*;

use crate::state::Notice;

/// Coloured status box above a flow.
#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    let (fg, bg) = notice.colors();

    rsx! {
        div {
            style: "margin: 12px 0; padding: 12px 16px; border-radius: 12px; background: {bg}; display: flex; align-items: flex-start; gap: 12px;",
            div { style: "flex: 1;",
                p { style: "color: {fg}; font-weight: bold; margin: 0;", "{notice.text}" }
                if let Some(ref detail) = notice.detail {
                    p { style: "color: #555; font-size: 14px; margin: 4px 0 0;", "{detail}" }
                }
            }
            button {
                style: "border: none; background: transparent; color: {fg}; font-size: 16px; cursor: pointer;",
                onclick: move |_| on_dismiss.call(()),
                "\u{2715}"
            }
        }
    }
}
