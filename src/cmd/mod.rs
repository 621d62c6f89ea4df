// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   merge, get, keys, options
//! ```

pub mod config;
pub mod merge;
