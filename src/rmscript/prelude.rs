//! Prelude module for the rmscript crate.
//!
//! Re-exports the commonly used names so downstream adapter crates (out of
//! scope for this crate) can `use rmscript::prelude::*;`.

#[cfg(feature = "diagnostics")]
pub use crate::rmscript::diagnostics::ariadne_support::{SimpleSource, emit_diagnostics, to_report};

pub use crate::rmscript::{
    ast::{
        ActionPart, ActionStmt, LoopSoundStmt, PictureStmt, PlaySoundStmt, Program, RepeatStmt,
        Statement, WaitStmt,
    },
    compile::{CompilationResult, compile_file, compile_script, verify_script},
    diagnostics::{Diagnostic, Severity},
    ir::{Interp, Ir},
    lexer::lex,
    optimizer::optimize,
    parser::parse,
    semantic::analyze,
    token::{
        DirectionWord, DurationKeyword, Keyword, Position, StrengthLevel, Token, TokenKind,
    },
    values::{ActionKeyword, Direction, DurationSpec, PlayMode, Strength},
};
