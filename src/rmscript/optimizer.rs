//! Peephole optimizer: IR to IR. Merges adjacent waits and drops no-op
//! movements, preserving order and metadata everywhere else.

use itertools::Itertools;

use crate::rmscript::ir::Ir;

/// Optimizes `ir` in a single pass. Waits never merge across a non-wait
/// entry; every other entry keeps its position, count, and fields.
#[must_use]
pub fn optimize(ir: Vec<Ir>) -> Vec<Ir> {
    ir.into_iter()
        .filter(|entry| !entry.is_noop_movement())
        .coalesce(|a, b| match (&a, &b) {
            (
                Ir::Wait {
                    duration_sec: d1,
                    source_line,
                },
                Ir::Wait { duration_sec: d2, .. },
            ) => Ok(Ir::Wait {
                duration_sec: d1 + d2,
                source_line: *source_line,
            }),
            _ => Err((a, b)),
        })
        .collect()
}
