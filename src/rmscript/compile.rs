//! The compilation driver: threads source text through the lexer, parser,
//! semantic analyzer, and optimizer, and aggregates the result.

use std::path::Path;

use crate::rmscript::diagnostics::{Diagnostic, Severity};
use crate::rmscript::ir::Ir;
use crate::rmscript::{lexer, optimizer, parser, semantic};

/// The aggregated result of compiling one rmscript source file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompilationResult {
    /// The script's name, derived from the filename or supplied by the caller.
    pub name: String,
    /// The concatenation of any leading `DESCRIPTION` lines, if any.
    pub description: Option<String>,
    /// `true` iff `errors` is empty. Warnings alone do not fail compilation.
    pub success: bool,
    /// Every error diagnostic accumulated across all phases.
    pub errors: Vec<Diagnostic>,
    /// Every warning diagnostic accumulated across all phases.
    pub warnings: Vec<Diagnostic>,
    /// The original source text, unmodified.
    pub source_code: String,
    /// The path the source was read from, if compiled via [`compile_file`].
    pub source_file_path: Option<String>,
    /// The optimized intermediate representation.
    pub ir: Vec<Ir>,
}

/// Compiles `source` into a [`CompilationResult`]. Pure: allocates only
/// local data and performs no I/O.
///
/// `name` is used verbatim as the resulting script's name; pass `None` to
/// leave it empty (callers deriving a name from a path should use
/// [`compile_file`], which does that derivation for you).
#[must_use]
pub fn compile_script(source: &str, name: Option<&str>) -> CompilationResult {
    let name = name.unwrap_or_default();
    let (tokens, lex_diags) = lexer::lex(source);
    let (program, parse_diags) = parser::parse(&tokens, source, name);
    let (ir, semantic_diags) = semantic::analyze(&program);
    let ir = optimizer::optimize(ir);

    let mut diagnostics = lex_diags;
    diagnostics.extend(parse_diags);
    diagnostics.extend(semantic_diags);
    let (errors, warnings): (Vec<_>, Vec<_>) =
        diagnostics.into_iter().partition(Diagnostic::is_error);

    CompilationResult {
        name: program.name,
        description: program.description,
        success: errors.is_empty(),
        errors,
        warnings,
        source_code: source.to_string(),
        source_file_path: None,
        ir,
    }
}

/// Reads `path`, derives a script name from its filename stem (whitespace
/// folded to underscores), and compiles it. Returns an I/O error diagnostic
/// (not a panic) if the file cannot be read.
#[must_use]
pub fn compile_file(path: impl AsRef<Path>) -> CompilationResult {
    let path = path.as_ref();
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return CompilationResult {
                name: String::new(),
                description: None,
                success: false,
                errors: vec![Diagnostic {
                    line: 0,
                    column: 0,
                    message: format!("Could not read '{}': {err}", path.display()),
                    severity: Severity::Error,
                }],
                warnings: Vec::new(),
                source_code: String::new(),
                source_file_path: Some(path.display().to_string()),
                ir: Vec::new(),
            };
        }
    };
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(' ', "_"))
        .unwrap_or_default();
    let mut result = compile_script(&source, Some(&name));
    result.source_file_path = Some(path.display().to_string());
    result
}

/// Convenience wrapper that compiles `source` and returns only
/// `(success, formatted_diagnostic_messages)`, discarding the IR.
#[must_use]
pub fn verify_script(source: &str) -> (bool, Vec<String>) {
    let result = compile_script(source, None);
    let messages = result
        .errors
        .iter()
        .chain(result.warnings.iter())
        .map(ToString::to_string)
        .collect();
    (result.success, messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_compile_has_no_errors() {
        let result = compile_script("look left\n", Some("demo"));
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(result.name, "demo");
        assert_eq!(result.ir.len(), 1);
    }

    #[test]
    fn warnings_alone_do_not_fail() {
        let result = compile_script("turn left 200\n", None);
        assert!(result.success);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn errors_fail_compilation_but_still_produce_ir_for_good_lines() {
        let result = compile_script("look left\nwait 5\npicture\n", None);
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.ir.len(), 2);
    }

    #[test]
    fn verify_script_reports_messages_without_ir() {
        let (success, messages) = verify_script("turn left 200\n");
        assert!(success);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn description_is_captured() {
        let result = compile_script("DESCRIPTION wave hello\nlook left\n", None);
        assert_eq!(result.description.as_deref(), Some("wave hello"));
    }

    #[test]
    fn compile_file_reports_missing_file_as_error() {
        let result = compile_file("/nonexistent/path/to/script.rms");
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
    }
}
