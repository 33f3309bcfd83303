//! Constant lookup tables used by the semantic analyzer: context-aware
//! qualitative strength values, per-keyword defaults, and physical-limit
//! warn thresholds.

use crate::rmscript::token::StrengthLevel;

/// Which channel a qualitative strength is being resolved for. The same
/// [`StrengthLevel`] resolves to a different numeric magnitude depending on
/// this context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualContext {
    /// `turn` — body yaw, in degrees.
    BodyYaw,
    /// `tilt`, or `look up`/`look down` — head roll/pitch, in degrees.
    HeadPitchOrRoll,
    /// `look left`/`look right` — head yaw, in degrees.
    HeadYaw,
    /// `head forward/back/left/right/up/down` — head translation, in mm.
    HeadTranslation,
    /// `antenna` — in degrees.
    Antenna,
}

/// Resolves a qualitative [`StrengthLevel`] to a numeric magnitude for the
/// given context, in source units (degrees or millimeters).
#[must_use]
pub const fn qualitative_value(level: StrengthLevel, context: QualContext) -> f64 {
    use QualContext::{Antenna, BodyYaw, HeadPitchOrRoll, HeadTranslation, HeadYaw};
    use StrengthLevel::{Large, Medium, Small, VeryLarge, VerySmall};
    match (level, context) {
        (VerySmall, BodyYaw) => 10.0,
        (VerySmall, HeadPitchOrRoll) => 5.0,
        (VerySmall, HeadYaw) => 5.0,
        (VerySmall, HeadTranslation) => 2.0,
        (VerySmall, Antenna) => 10.0,

        (Small, BodyYaw) => 30.0,
        (Small, HeadPitchOrRoll) => 10.0,
        (Small, HeadYaw) => 15.0,
        (Small, HeadTranslation) => 5.0,
        (Small, Antenna) => 30.0,

        (Medium, BodyYaw) => 60.0,
        (Medium, HeadPitchOrRoll) => 20.0,
        (Medium, HeadYaw) => 30.0,
        (Medium, HeadTranslation) => 10.0,
        (Medium, Antenna) => 60.0,

        (Large, BodyYaw) => 90.0,
        (Large, HeadPitchOrRoll) => 30.0,
        (Large, HeadYaw) => 45.0,
        (Large, HeadTranslation) => 20.0,
        (Large, Antenna) => 90.0,

        (VeryLarge, BodyYaw) => 120.0,
        (VeryLarge, HeadPitchOrRoll) => 38.0,
        (VeryLarge, HeadYaw) => 60.0,
        (VeryLarge, HeadTranslation) => 28.0,
        (VeryLarge, Antenna) => 110.0,
    }
}

/// The default magnitude applied when a part carries no strength at all,
/// in source units.
#[must_use]
pub const fn default_strength(context: QualContext) -> f64 {
    use QualContext::{Antenna, BodyYaw, HeadPitchOrRoll, HeadTranslation, HeadYaw};
    match context {
        BodyYaw | HeadPitchOrRoll | HeadYaw => 30.0,
        HeadTranslation => 10.0,
        Antenna => 45.0,
    }
}

/// Default duration, in seconds, applied when a part carries no duration.
pub const DEFAULT_DURATION_SEC: f64 = 1.0;

/// Warn threshold for body yaw, in degrees.
pub const WARN_BODY_YAW_DEG: f64 = 160.0;
/// Warn threshold for head pitch (`look up`/`look down`), in degrees.
pub const WARN_HEAD_PITCH_DEG: f64 = 40.0;
/// Warn threshold for head roll (`tilt`), in degrees.
pub const WARN_HEAD_ROLL_DEG: f64 = 40.0;
/// Warn threshold for head yaw relative to body (`look left`/`look right`), in degrees.
pub const WARN_HEAD_YAW_DEG: f64 = 65.0;
/// Warn threshold for antenna angles, in degrees.
pub const WARN_ANTENNA_DEG: f64 = 65.0;
/// Hard physical ceiling for antenna angles, in degrees. The semantic layer
/// never clamps values against it (adapters/hardware do), but flags any
/// magnitude beyond it with its own warning, distinct from
/// [`WARN_ANTENNA_DEG`]'s ordinary safe-range warning.
pub const ANTENNA_HARD_CEILING_DEG: f64 = 180.0;
/// Warn threshold for head X/Y translation, in millimeters (the tighter of
/// two candidate limit tables; see `DESIGN.md`'s Open Question decisions).
pub const WARN_HEAD_TRANS_XY_MM: f64 = 30.0;
/// Warn threshold for forward head Z+ translation, in millimeters.
pub const WARN_HEAD_TRANS_Z_POS_MM: f64 = 20.0;
/// Warn threshold for backward head Z- translation, in millimeters.
pub const WARN_HEAD_TRANS_Z_NEG_MM: f64 = 40.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualitative_table_resolves_known_entries() {
        assert_eq!(qualitative_value(StrengthLevel::Medium, QualContext::BodyYaw), 60.0);
        assert_eq!(
            qualitative_value(StrengthLevel::VeryLarge, QualContext::Antenna),
            110.0
        );
        assert_eq!(
            qualitative_value(StrengthLevel::VerySmall, QualContext::HeadTranslation),
            2.0
        );
    }

    #[test]
    fn defaults_match_per_context_constants() {
        assert_eq!(default_strength(QualContext::BodyYaw), 30.0);
        assert_eq!(default_strength(QualContext::HeadTranslation), 10.0);
        assert_eq!(default_strength(QualContext::Antenna), 45.0);
    }
}
