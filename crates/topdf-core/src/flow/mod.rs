// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flow sessions: the state machines behind the two tabs.
//
// Sessions own all per-flow state and are mutated only in response to user
// actions or completed background work. Background work is handed a ticket
// when it starts; a result whose ticket has been superseded by a later edit
// is discarded rather than applied.

pub mod convert;
pub mod removal;
