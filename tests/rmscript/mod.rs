//! Tests for `rmscript`, the compiler front-end.

mod end_to_end_scenarios;
mod invariants;

use rmscript::ir::Ir;

/// Compiles `source` and asserts it succeeds with no warnings, returning the IR.
pub fn compile_clean(source: &str) -> Vec<Ir> {
    let result = rmscript::compile_script(source, None);
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "unexpected warnings: {:?}", result.warnings);
    result.ir
}
