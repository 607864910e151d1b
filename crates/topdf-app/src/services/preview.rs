// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Thumbnails are shown as `data:` URIs so the webview needs no file access.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use topdf_core::Thumbnail;

pub fn thumbnail_data_uri(thumbnail: &Thumbnail) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(&thumbnail.png))
}
