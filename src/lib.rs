//! `rmscript` is a small domain-specific language for describing short
//! robot behaviors: head orientation, body rotation, antennas, head
//! translation, waits, sound playback, picture capture, and bounded
//! repetition.
//!
//! This crate is the compiler **front-end only**: the pure pipeline that
//! turns rmscript source text into a validated, optimized intermediate
//! representation (IR). Execution adapters that consume the IR (robot queue
//! executors, network streamers, simulators), CLI runners, sound-file
//! resolution, and all hardware I/O are out of scope and live elsewhere.
//!
//! # Usage
//!
//! ```
//! use rmscript::compile_script;
//!
//! let result = compile_script("look left\nwait 0.5s\n", Some("demo"));
//! assert!(result.success);
//! assert_eq!(result.ir.len(), 2);
//! ```
//!
//! For a file on disk, use [`rmscript::compile_file`](rmscript::compile_file).
//!
//! # About the format
//!
//! A script is a sequence of indentation-sensitive statements:
//!
//! ```text
//! DESCRIPTION wave hello and look around
//! look left and up
//! turn right 30 for 1s
//! antenna both up
//! wait 0.5s
//! repeat 3
//!     play beep.wav
//!     wait 0.2s
//! ```
//!
//! Each statement compiles to zero or more IR entries: movements (merged
//! head/body/antenna pose changes), waits, picture captures, and sound
//! playback. `repeat` blocks are expanded inline at compile time; there is
//! no runtime looping construct in the IR.
//!
//! # Features
//!
//! - `diagnostics` (default): pretty-prints diagnostics against the
//!   original source using `ariadne`.
//! - `serde`: derives `Serialize`/`Deserialize` on the public token, AST,
//!   and diagnostic types (the IR and [`rmscript::CompilationResult`] are
//!   `Serialize`-only).

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod rmscript;

pub use rmscript::{
    CompilationResult, ast, compile_file, compile_script, diagnostics, ir, lexer, optimizer,
    parser, prelude, semantic, token, values, verify_script,
};
