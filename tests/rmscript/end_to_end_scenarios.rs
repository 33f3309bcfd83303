//! Six worked compile scenarios, each a direct compile-to-IR check.

use pretty_assertions::assert_eq;
use rmscript::compile_script;
use rmscript::ir::Ir;

#[test]
fn look_left_rotates_head_yaw_by_30_degrees() {
    let result = compile_script("look left", Some("scenario1"));
    assert!(result.success);
    assert!(result.warnings.is_empty());
    assert_eq!(result.ir.len(), 1);
    let Ir::Movement {
        head_pose,
        duration_sec,
        ..
    } = &result.ir[0]
    else {
        panic!("expected a movement");
    };
    let pose = head_pose.expect("head_pose channel must be written");
    assert!((pose[(0, 0)] - 30.0_f64.to_radians().cos()).abs() < 1e-9);
    assert!((pose[(1, 0)] - 30.0_f64.to_radians().sin()).abs() < 1e-9);
    assert_eq!(*duration_sec, 1.0);
}

#[test]
fn consecutive_waits_merge_into_one() {
    let result = compile_script("wait 0.5s\nwait 0.25s\nwait 0s\n", None);
    assert!(result.success);
    assert_eq!(result.ir, vec![Ir::Wait { duration_sec: 0.75, source_line: 1 }]);
}

#[test]
fn out_of_range_body_yaw_warns_but_keeps_the_requested_value() {
    let result = compile_script("turn left 200", None);
    assert!(result.success);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(
        result.warnings[0].message,
        "Body yaw 200.0\u{b0} exceeds safe range (\u{b1}160.0\u{b0}), will be clamped"
    );
    let Ir::Movement { body_yaw, .. } = &result.ir[0] else {
        panic!("expected a movement");
    };
    assert!((body_yaw.unwrap() - 200.0_f64.to_radians()).abs() < 1e-9);
}

#[test]
fn repeat_unrolls_its_body_in_source_order() {
    let result = compile_script("repeat 2\n    look left\n    wait 0.5s\n", None);
    assert!(result.success);
    assert_eq!(result.ir.len(), 4);
    assert!(matches!(result.ir[0], Ir::Movement { .. }));
    assert_eq!(result.ir[1], Ir::Wait { duration_sec: 0.5, source_line: 3 });
    assert!(matches!(result.ir[2], Ir::Movement { .. }));
    assert_eq!(result.ir[3], Ir::Wait { duration_sec: 0.5, source_line: 3 });
}

#[test]
fn and_cannot_combine_a_movement_with_picture() {
    let result = compile_script("look left and picture", None);
    assert!(!result.success);
    assert!(result.ir.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert!(
        result.errors[0]
            .message
            .contains("Cannot combine movement with 'picture' using 'and'. Use separate lines instead.")
    );
}

#[test]
fn antenna_look_and_turn_merge_into_a_single_movement() {
    let result = compile_script("antenna both up and look up 25 and turn left 30", None);
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.ir.len(), 1);
    let Ir::Movement {
        head_pose,
        antennas,
        body_yaw,
        ..
    } = &result.ir[0]
    else {
        panic!("expected a movement");
    };
    assert!(head_pose.is_some());
    let (left, right) = antennas.expect("antennas channel must be written");
    assert!(left.abs() < 1e-9 && right.abs() < 1e-9);
    assert!((body_yaw.unwrap() - 30.0_f64.to_radians()).abs() < 1e-9);
}
