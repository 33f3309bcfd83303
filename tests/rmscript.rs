//! Entry point for the `rmscript` integration test suite.

#[path = "rmscript/mod.rs"]
mod rmscript;
