//! # PAIRSCAN
//!
//! Cached, compatibility-gated AST analysis over JavaScript project pairs.
//!
//! PAIRSCAN runs a pluggable per-file AST analysis over a "target" project,
//! optionally gated on a "reference" project the target depends on, and
//! persists a deterministic, cache-portable result so repeated runs over
//! unchanged inputs cost nothing.
//!
//! ## Lifecycle
//!
//! `AnalyzerDriver::execute(config)` runs prepare → traverse → finalize.
//! Prepare can short-circuit with a skip-result (incompatible pair) or a
//! cache hit; traversal analyzes target files one at a time in discovery
//! order; finalize sanitizes the result and writes it to the cache store.
//!
//! ## Shipped analyzers
//!
//! - `count-imports`: import and `require()` specifiers per file
//! - `match-imports`: imports resolving to the reference package

pub mod analyzers;
pub mod ast;
pub mod cache;
pub mod core;
pub mod logging;
pub mod project;
