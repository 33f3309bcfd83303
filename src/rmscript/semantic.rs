//! Semantic analysis: AST to IR. Resolves defaults and qualitative
//! strengths, computes head-pose matrices, validates physical limits,
//! expands `repeat` blocks, and merges sibling parts of one statement into a
//! single [`crate::rmscript::ir::Ir::Movement`].

pub mod pose;
pub mod tables;

use nalgebra::Vector3;

use crate::rmscript::ast::{ActionPart, ActionStmt, Program, Statement};
use crate::rmscript::diagnostics::{Diagnostic, SemanticIssue};
use crate::rmscript::ir::{Interp, Ir};
use crate::rmscript::token::{DirectionWord, Position};
use crate::rmscript::values::{ActionKeyword, Direction, DurationSpec, Strength};
use tables::QualContext;

const MM_PER_M: f64 = 1000.0;

/// Runs the semantic analyzer over `program`, producing a flat IR list and
/// any diagnostics accumulated along the way.
#[must_use]
pub fn analyze(program: &Program) -> (Vec<Ir>, Vec<Diagnostic>) {
    let mut expanded = Vec::new();
    expand(&program.statements, &mut expanded);

    let mut ir = Vec::new();
    let mut diagnostics = Vec::new();
    for statement in expanded {
        match statement {
            Statement::Action(stmt) => {
                if let Some(movement) = lower_action(stmt, &mut diagnostics) {
                    ir.push(movement);
                }
            }
            Statement::Wait(stmt) => ir.push(Ir::Wait {
                duration_sec: stmt.seconds,
                source_line: stmt.source_line,
            }),
            Statement::Picture(stmt) => ir.push(Ir::Picture {
                source_line: stmt.source_line,
            }),
            Statement::PlaySound(stmt) => ir.push(Ir::PlaySound {
                name: stmt.name.clone(),
                mode: stmt.mode,
                source_line: stmt.source_line,
            }),
            Statement::LoopSound(stmt) => ir.push(Ir::LoopSound {
                name: stmt.name.clone(),
                duration_sec: stmt.seconds,
                source_line: stmt.source_line,
            }),
            Statement::Repeat(_) => unreachable!("expand() flattens all repeat blocks"),
        }
    }
    (ir, diagnostics)
}

/// Recursively expands `repeat` blocks in source order.
/// A count of zero contributes nothing; expansion recurses into nested
/// repeats before flattening.
fn expand<'a>(statements: &'a [Statement], out: &mut Vec<&'a Statement>) {
    for statement in statements {
        match statement {
            Statement::Repeat(repeat) => {
                for _ in 0..repeat.count {
                    expand(&repeat.body, out);
                }
            }
            other => out.push(other),
        }
    }
}

/// One fine-grained write target within a merged movement. Distinct from the
/// three IR-level channels (`head_pose`/`antennas`/`body_yaw`): `look` and
/// `tilt` both contribute to `head_pose`, but address different sub-axes, so
/// `look left and up` is not a conflict while `look left and look right` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    HeadYaw,
    HeadPitch,
    HeadRoll,
    HeadTransX,
    HeadTransY,
    HeadTransZ,
    BodyYaw,
    AntennaLeft,
    AntennaRight,
}

/// Accumulates the resolved numeric values of one merged movement before
/// composing the final IR entry.
#[derive(Default)]
struct MovementAccumulator {
    yaw_deg: Option<f64>,
    pitch_deg: Option<f64>,
    roll_deg: Option<f64>,
    trans_x_mm: Option<f64>,
    trans_y_mm: Option<f64>,
    trans_z_mm: Option<f64>,
    body_yaw_deg: Option<f64>,
    antenna_left_deg: Option<f64>,
    antenna_right_deg: Option<f64>,
}

fn lower_action(stmt: &ActionStmt, diagnostics: &mut Vec<Diagnostic>) -> Option<Ir> {
    let position = Position::new(stmt.source_line, 1);
    let mut seen_channels: Vec<Channel> = Vec::new();
    let mut accumulator = MovementAccumulator::default();
    let mut max_duration: Option<f64> = None;
    let mut any_channel_written = false;

    for part in &stmt.parts {
        let channels = part_channels(part);
        for channel in &channels {
            if seen_channels.contains(channel) {
                diagnostics.push(Diagnostic::semantic_error(
                    position,
                    SemanticIssue::ConflictingChannelWrite {
                        channel: format!("{channel:?}"),
                    },
                ));
                return None;
            }
        }
        seen_channels.extend(&channels);
        if !channels.is_empty() {
            any_channel_written = true;
        }

        apply_part(part, &mut accumulator, diagnostics, position);

        let duration_sec = resolve_duration(part.duration);
        max_duration = Some(max_duration.map_or(duration_sec, |current| current.max(duration_sec)));
    }
    let max_duration = max_duration.unwrap_or(tables::DEFAULT_DURATION_SEC);

    if !any_channel_written {
        return None;
    }

    let head_pose = if accumulator.yaw_deg.is_some()
        || accumulator.pitch_deg.is_some()
        || accumulator.roll_deg.is_some()
        || accumulator.trans_x_mm.is_some()
        || accumulator.trans_y_mm.is_some()
        || accumulator.trans_z_mm.is_some()
    {
        let translation = Vector3::new(
            accumulator.trans_x_mm.unwrap_or(0.0) / MM_PER_M,
            accumulator.trans_y_mm.unwrap_or(0.0) / MM_PER_M,
            accumulator.trans_z_mm.unwrap_or(0.0) / MM_PER_M,
        );
        Some(pose::compose(
            accumulator.yaw_deg.unwrap_or(0.0).to_radians(),
            accumulator.pitch_deg.unwrap_or(0.0).to_radians(),
            accumulator.roll_deg.unwrap_or(0.0).to_radians(),
            translation,
        ))
    } else {
        None
    };

    let antennas = if accumulator.antenna_left_deg.is_some() || accumulator.antenna_right_deg.is_some() {
        Some((
            accumulator.antenna_left_deg.unwrap_or(0.0).to_radians(),
            accumulator.antenna_right_deg.unwrap_or(0.0).to_radians(),
        ))
    } else {
        None
    };

    let body_yaw = accumulator.body_yaw_deg.map(f64::to_radians);

    Some(Ir::movement(
        head_pose,
        antennas,
        body_yaw,
        max_duration,
        Interp::MinJerk,
        stmt.source_line,
        stmt.source_text.clone(),
    ))
}

/// Returns the fine-grained channel(s) `part` writes to.
fn part_channels(part: &ActionPart) -> Vec<Channel> {
    match part.keyword {
        ActionKeyword::Look => match direction_word(part.direction) {
            DirectionWord::Left | DirectionWord::Right => vec![Channel::HeadYaw],
            DirectionWord::Up | DirectionWord::Down => vec![Channel::HeadPitch],
            DirectionWord::Center => vec![Channel::HeadYaw, Channel::HeadPitch],
            _ => vec![],
        },
        ActionKeyword::Turn => vec![Channel::BodyYaw],
        ActionKeyword::Tilt => vec![Channel::HeadRoll],
        ActionKeyword::Head => match direction_word(part.direction) {
            DirectionWord::Forward | DirectionWord::Back => vec![Channel::HeadTransX],
            DirectionWord::Left | DirectionWord::Right => vec![Channel::HeadTransY],
            DirectionWord::Up | DirectionWord::Down => vec![Channel::HeadTransZ],
            _ => vec![],
        },
        ActionKeyword::Antenna => match part.antenna_selector {
            Some(DirectionWord::Both) => vec![Channel::AntennaLeft, Channel::AntennaRight],
            Some(DirectionWord::Left) => vec![Channel::AntennaLeft],
            Some(DirectionWord::Right) => vec![Channel::AntennaRight],
            _ => vec![],
        },
    }
}

fn direction_word(direction: Direction) -> DirectionWord {
    match direction {
        Direction::Named(word) => word,
        Direction::Numeric(_) => DirectionWord::Left, // unreachable for non-antenna keywords
    }
}

fn apply_part(
    part: &ActionPart,
    acc: &mut MovementAccumulator,
    diagnostics: &mut Vec<Diagnostic>,
    position: Position,
) {
    match part.keyword {
        ActionKeyword::Turn => {
            let magnitude = resolve_strength(part.strength, QualContext::BodyYaw);
            let signed = match direction_word(part.direction) {
                DirectionWord::Left => magnitude,
                DirectionWord::Right => -magnitude,
                DirectionWord::Center => 0.0,
                _ => 0.0,
            };
            warn_if_exceeds(diagnostics, position, "Body yaw", signed, tables::WARN_BODY_YAW_DEG, "°");
            acc.body_yaw_deg = Some(signed);
        }
        ActionKeyword::Look => match direction_word(part.direction) {
            DirectionWord::Left | DirectionWord::Right => {
                let magnitude = resolve_strength(part.strength, QualContext::HeadYaw);
                let signed = if direction_word(part.direction) == DirectionWord::Left {
                    magnitude
                } else {
                    -magnitude
                };
                warn_if_exceeds(diagnostics, position, "Head yaw", signed, tables::WARN_HEAD_YAW_DEG, "°");
                acc.yaw_deg = Some(signed);
            }
            DirectionWord::Up | DirectionWord::Down => {
                let magnitude = resolve_strength(part.strength, QualContext::HeadPitchOrRoll);
                let signed = if direction_word(part.direction) == DirectionWord::Up {
                    -magnitude
                } else {
                    magnitude
                };
                warn_if_exceeds(diagnostics, position, "Head pitch", signed, tables::WARN_HEAD_PITCH_DEG, "°");
                acc.pitch_deg = Some(signed);
            }
            DirectionWord::Center => {
                acc.yaw_deg = Some(0.0);
                acc.pitch_deg = Some(0.0);
            }
            _ => {}
        },
        ActionKeyword::Tilt => {
            let magnitude = resolve_strength(part.strength, QualContext::HeadPitchOrRoll);
            let signed = match direction_word(part.direction) {
                DirectionWord::Left => magnitude,
                DirectionWord::Right => -magnitude,
                DirectionWord::Center => 0.0,
                _ => 0.0,
            };
            warn_if_exceeds(diagnostics, position, "Head tilt", signed, tables::WARN_HEAD_ROLL_DEG, "°");
            acc.roll_deg = Some(signed);
        }
        ActionKeyword::Head => {
            let magnitude = resolve_strength(part.strength, QualContext::HeadTranslation);
            match direction_word(part.direction) {
                DirectionWord::Forward | DirectionWord::Back => {
                    let signed = if direction_word(part.direction) == DirectionWord::Forward {
                        magnitude
                    } else {
                        -magnitude
                    };
                    let threshold = tables::WARN_HEAD_TRANS_XY_MM;
                    warn_if_exceeds(diagnostics, position, "Head X", signed, threshold, "mm");
                    acc.trans_x_mm = Some(signed);
                }
                DirectionWord::Left | DirectionWord::Right => {
                    let signed = if direction_word(part.direction) == DirectionWord::Left {
                        magnitude
                    } else {
                        -magnitude
                    };
                    let threshold = tables::WARN_HEAD_TRANS_XY_MM;
                    warn_if_exceeds(diagnostics, position, "Head Y", signed, threshold, "mm");
                    acc.trans_y_mm = Some(signed);
                }
                DirectionWord::Up | DirectionWord::Down => {
                    let signed = if direction_word(part.direction) == DirectionWord::Up {
                        magnitude
                    } else {
                        -magnitude
                    };
                    let threshold = if signed >= 0.0 {
                        tables::WARN_HEAD_TRANS_Z_POS_MM
                    } else {
                        tables::WARN_HEAD_TRANS_Z_NEG_MM
                    };
                    warn_if_exceeds(diagnostics, position, "Head Z", signed, threshold, "mm");
                    acc.trans_z_mm = Some(signed);
                }
                _ => {}
            }
        }
        ActionKeyword::Antenna => {
            let angle = antenna_angle(part);
            warn_if_exceeds(diagnostics, position, "Antenna", angle, tables::WARN_ANTENNA_DEG, "°");
            if angle.abs() > tables::ANTENNA_HARD_CEILING_DEG {
                diagnostics.push(Diagnostic::semantic_warning(
                    position,
                    SemanticIssue::AntennaExceedsHardCeiling {
                        value: angle,
                        ceiling: tables::ANTENNA_HARD_CEILING_DEG,
                    },
                ));
            }
            match part.antenna_selector {
                Some(DirectionWord::Both) => {
                    acc.antenna_left_deg = Some(angle);
                    acc.antenna_right_deg = Some(angle);
                }
                Some(DirectionWord::Left) => acc.antenna_left_deg = Some(angle),
                Some(DirectionWord::Right) => acc.antenna_right_deg = Some(angle),
                _ => {}
            }
        }
    }
}

/// Resolves the antenna angle, in degrees, for one `ActionPart`. An explicit
/// target (a clock position or a clock/directional keyword) takes precedence
/// over strength; strength (explicit or defaulted) otherwise supplies the
/// magnitude, signed by the selector.
fn antenna_angle(part: &ActionPart) -> f64 {
    if let Direction::Numeric(clock) = part.direction {
        return normalize_degrees(clock * 30.0);
    }
    if let Direction::Named(word) = part.direction {
        if let Some(angle) = antenna_target_angle(word) {
            return angle;
        }
    }
    let magnitude = resolve_strength(part.strength, QualContext::Antenna);
    match part.antenna_selector {
        Some(DirectionWord::Left) => -magnitude,
        Some(DirectionWord::Right) => magnitude,
        _ => magnitude,
    }
}

/// The antenna target-word-to-angle table (see `DESIGN.md`'s Open Question
/// decisions for the worked derivation).
fn antenna_target_angle(word: DirectionWord) -> Option<f64> {
    Some(match word {
        DirectionWord::Up | DirectionWord::High => 0.0,
        DirectionWord::Down | DirectionWord::Low => 180.0,
        DirectionWord::Left | DirectionWord::Int => -90.0,
        DirectionWord::Right | DirectionWord::Ext => 90.0,
        _ => return None,
    })
}

/// Normalizes an angle in degrees to `(-180, 180]`.
fn normalize_degrees(mut deg: f64) -> f64 {
    deg %= 360.0;
    if deg <= -180.0 {
        deg += 360.0;
    } else if deg > 180.0 {
        deg -= 360.0;
    }
    deg
}

fn resolve_strength(strength: Option<Strength>, context: QualContext) -> f64 {
    match strength {
        None => tables::default_strength(context),
        Some(Strength::Numeric(n)) => n,
        Some(Strength::Qualitative(level)) => tables::qualitative_value(level, context),
    }
}

fn resolve_duration(duration: Option<DurationSpec>) -> f64 {
    match duration {
        None => tables::DEFAULT_DURATION_SEC,
        Some(DurationSpec::Seconds(s)) => s,
        Some(DurationSpec::Keyword(kw)) => kw.seconds(),
    }
}

fn warn_if_exceeds(
    diagnostics: &mut Vec<Diagnostic>,
    position: Position,
    label: &str,
    value: f64,
    threshold: f64,
    unit: &str,
) {
    if value.abs() > threshold {
        diagnostics.push(Diagnostic::semantic_warning(
            position,
            SemanticIssue::PhysicalLimitExceeded {
                label: label.to_string(),
                value,
                threshold,
                unit: unit.to_string(),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rmscript::lexer::lex;
    use crate::rmscript::parser::parse;

    fn analyze_source(source: &str) -> (Vec<Ir>, Vec<Diagnostic>) {
        let (tokens, lex_diags) = lex(source);
        assert!(lex_diags.is_empty(), "{lex_diags:?}");
        let (program, parse_diags) = parse(&tokens, source, "test");
        assert!(parse_diags.is_empty(), "{parse_diags:?}");
        analyze(&program)
    }

    #[test]
    fn look_left_yields_yaw_rotation() {
        let (ir, diags) = analyze_source("look left\n");
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(ir.len(), 1);
        let Ir::Movement {
            head_pose,
            duration_sec,
            ..
        } = &ir[0]
        else {
            panic!()
        };
        assert!(head_pose.is_some());
        assert_eq!(*duration_sec, 1.0);
    }

    #[test]
    fn turn_left_200_warns_and_preserves_value() {
        let (ir, diags) = analyze_source("turn left 200\n");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("Body yaw 200.0\u{b0} exceeds safe range (\u{b1}160.0\u{b0}), will be clamped"));
        let Ir::Movement { body_yaw, .. } = &ir[0] else {
            panic!()
        };
        assert!((body_yaw.unwrap() - 200.0_f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn repeat_expands_body_in_order() {
        let (ir, diags) = analyze_source("repeat 2\n    look left\n    wait 0.5s\n");
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(ir.len(), 4);
        assert!(matches!(ir[0], Ir::Movement { .. }));
        assert!(matches!(ir[1], Ir::Wait { .. }));
        assert!(matches!(ir[2], Ir::Movement { .. }));
        assert!(matches!(ir[3], Ir::Wait { .. }));
    }

    #[test]
    fn repeat_zero_emits_nothing() {
        let (ir, _) = analyze_source("repeat 0\n    look left\n");
        assert!(ir.is_empty());
    }

    #[test]
    fn compound_antenna_look_turn_merges_into_one_movement() {
        let (ir, diags) = analyze_source("antenna both up and look up 25 and turn left 30\n");
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(ir.len(), 1);
        let Ir::Movement {
            head_pose,
            antennas,
            body_yaw,
            ..
        } = &ir[0]
        else {
            panic!()
        };
        assert!(head_pose.is_some());
        let (left, right) = antennas.unwrap();
        assert!(left.abs() < 1e-9 && right.abs() < 1e-9);
        assert!((body_yaw.unwrap() - 30.0_f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn look_left_and_up_is_not_a_conflict() {
        let (ir, diags) = analyze_source("look left and up\n");
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(ir.len(), 1);
    }

    #[test]
    fn look_left_and_look_right_conflicts() {
        let (ir, diags) = analyze_source("look left and look right\n");
        assert!(ir.is_empty());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("Conflicting writes"));
    }

    #[test]
    fn picture_and_sound_pass_through() {
        let (ir, diags) = analyze_source("picture\nplay Beep\nloop Ambient 5s\n");
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(ir.len(), 3);
        assert!(matches!(ir[0], Ir::Picture { .. }));
        assert!(matches!(ir[1], Ir::PlaySound { .. }));
        assert!(matches!(ir[2], Ir::LoopSound { .. }));
    }

    #[test]
    fn merged_duration_takes_the_maximum() {
        let (ir, _) = analyze_source("look left fast and turn left slow\n");
        let Ir::Movement { duration_sec, .. } = &ir[0] else {
            panic!()
        };
        assert_eq!(*duration_sec, 2.0);
    }

    #[test]
    fn explicit_duration_under_the_default_is_not_forced_up_to_it() {
        let (ir, _) = analyze_source("look left 0.2s\n");
        let Ir::Movement { duration_sec, .. } = &ir[0] else {
            panic!()
        };
        assert_eq!(*duration_sec, 0.2);
    }

    #[test]
    fn merged_short_durations_take_the_maximum_of_the_parts_not_the_default() {
        let (ir, _) = analyze_source("turn left 30 0.3s and look right 10 0.4s\n");
        let Ir::Movement { duration_sec, .. } = &ir[0] else {
            panic!()
        };
        assert_eq!(*duration_sec, 0.4);
    }

    #[test]
    fn antenna_clock_normalizes() {
        let (ir, _) = analyze_source("antenna left 9\n");
        let Ir::Movement { antennas, .. } = &ir[0] else {
            panic!()
        };
        let (left, _) = antennas.unwrap();
        assert!((left - (-90.0_f64).to_radians()).abs() < 1e-9);
    }

    #[test]
    fn antenna_angle_beyond_the_hard_ceiling_warns_distinctly() {
        // Every antenna target reachable through the parser is already bounded
        // to +/-180 degrees; this exercises `apply_part`'s defensive check
        // directly against a magnitude a future grammar extension (or a
        // malformed AST from another front-end) could still produce.
        let part = ActionPart {
            keyword: ActionKeyword::Antenna,
            direction: Direction::Named(DirectionWord::Center),
            antenna_selector: Some(DirectionWord::Left),
            strength: Some(Strength::Numeric(200.0)),
            duration: None,
        };
        let mut acc = MovementAccumulator::default();
        let mut diagnostics = Vec::new();
        apply_part(&part, &mut acc, &mut diagnostics, Position::new(1, 1));
        assert_eq!(acc.antenna_left_deg, Some(-200.0));
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("exceeds the hard physical ceiling"))
        );
    }
}
