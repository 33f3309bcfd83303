//! Property-style checks for the six invariants laid out alongside the
//! worked scenarios: determinism, source-line monotonicity, no-error implies
//! success, optimizer semantics preservation, case insensitivity, and
//! optimizer idempotence.

use pretty_assertions::assert_eq;
use rmscript::compile_script;
use rmscript::ir::Ir;
use rmscript::optimizer::optimize;

const SAMPLE_SCRIPT: &str = "\
DESCRIPTION wave hello
look left and up
wait 0.5s
repeat 2
    turn right medium
    play Beep.wav
antenna both up
tilt left fast
";

#[test]
fn compiling_the_same_source_twice_yields_identical_results() {
    let first = compile_script(SAMPLE_SCRIPT, Some("determinism"));
    let second = compile_script(SAMPLE_SCRIPT, Some("determinism"));
    assert_eq!(first.ir, second.ir);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn source_line_is_non_decreasing_outside_repeat_expansion() {
    let ir = super::compile_clean("look left\nwait 1s\npicture\nplay Beep.wav\n");
    let lines: Vec<u32> = ir.iter().map(Ir::source_line).collect();
    assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]), "{lines:?}");
}

#[test]
fn success_flag_matches_absence_of_errors() {
    let clean = compile_script("look left\n", None);
    assert_eq!(clean.success, clean.errors.is_empty());
    assert!(clean.success);

    let broken = compile_script("wait 5\n", None);
    assert_eq!(broken.success, broken.errors.is_empty());
    assert!(!broken.success);
}

#[test]
fn optimizer_preserves_wait_totals_and_every_other_entry() {
    let before = compile_script(SAMPLE_SCRIPT, None).ir;
    // compile_script already runs the optimizer; re-derive a pre-optimized
    // trace by compiling a script whose waits the optimizer would merge, and
    // check the sum is preserved across an extra optimize() pass.
    let unoptimized = vec![
        Ir::Wait { duration_sec: 0.5, source_line: 1 },
        Ir::Wait { duration_sec: 0.25, source_line: 2 },
        Ir::Picture { source_line: 3 },
        Ir::Wait { duration_sec: 1.0, source_line: 4 },
    ];
    let optimized = optimize(unoptimized.clone());
    let wait_sum = |ir: &[Ir]| -> f64 {
        ir.iter().filter_map(Ir::wait_duration).sum()
    };
    assert_eq!(wait_sum(&unoptimized), wait_sum(&optimized));
    assert!(optimized.iter().any(|entry| matches!(entry, Ir::Picture { .. })));
    assert!(!before.is_empty());
}

#[test]
fn compiling_uppercase_source_yields_the_same_ir_as_lowercase() {
    let lower = "look left and up\nturn right medium\nwait 1.5s\n";
    let upper = "LOOK LEFT AND UP\nTURN RIGHT MEDIUM\nWAIT 1.5S\n";
    let lower_result = compile_script(lower, None);
    let upper_result = compile_script(upper, None);
    assert!(lower_result.success, "{:?}", lower_result.errors);
    assert_eq!(lower_result.ir, upper_result.ir);
}

#[test]
fn optimizer_is_idempotent() {
    let ir = vec![
        Ir::Wait { duration_sec: 0.5, source_line: 1 },
        Ir::Wait { duration_sec: 0.5, source_line: 2 },
        Ir::Picture { source_line: 3 },
        Ir::movement(None, None, None, 1.0, rmscript::ir::Interp::MinJerk, 4, ""),
    ];
    let once = optimize(ir);
    let twice = optimize(once.clone());
    assert_eq!(once, twice);
}
