// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ToPDF: Core types, accept filters, flow state machines and error definitions
// shared across all crates.

pub mod accept;
pub mod config;
pub mod error;
pub mod flow;
pub mod human_errors;
pub mod types;

pub use accept::AcceptFilter;
pub use config::AppConfig;
pub use error::ToPdfError;
pub use flow::convert::{ConvertPhase, ConvertSession};
pub use flow::removal::{RemovalPhase, RemovalSession, ThumbnailSlot};
pub use types::*;
