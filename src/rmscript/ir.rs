//! The intermediate representation produced by [`crate::rmscript::semantic`] and
//! consumed, read-only, by [`crate::rmscript::optimizer`].

use nalgebra::Matrix4;

use crate::rmscript::values::PlayMode;

/// Interpolation curve an adapter should use to drive a movement. The compiler
/// never selects anything but [`Interp::MinJerk`]; the other variants exist
/// for adapters and future compiler versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interp {
    /// Minimum-jerk interpolation. The default, and currently the only value
    /// the compiler emits.
    #[default]
    MinJerk,
    /// Linear interpolation.
    Linear,
    /// Ease-in/ease-out interpolation.
    Ease,
    /// Exaggerated, cartoon-style interpolation.
    Cartoon,
}

/// One entry of the flat, ordered intermediate representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Ir {
    /// A merged movement. Every `Some` field records a channel the adapter must drive.
    Movement {
        /// The head's rigid pose, as `T · Rz(yaw) · Ry(pitch) · Rx(roll)` applied
        /// to the identity (rotation in the upper-left 3×3, translation in the
        /// last column, bottom row `[0 0 0 1]`). `None` if no part of this
        /// movement addressed the head.
        head_pose: Option<Matrix4<f64>>,
        /// The `(left, right)` antenna angles in radians. `None` if this
        /// movement didn't address the antennas.
        antennas: Option<(f64, f64)>,
        /// The body yaw in radians. `None` if this movement didn't address the body.
        body_yaw: Option<f64>,
        /// The duration of this movement, in seconds. Always `> 0` when any
        /// channel is `Some`.
        duration_sec: f64,
        /// The interpolation curve to use.
        interpolation: Interp,
        /// The 1-indexed source line this movement was derived from.
        source_line: u32,
        /// The original source text of the originating statement's line.
        source_text: String,
    },
    /// A pause with no other effect.
    Wait {
        /// The duration, in seconds. Always `>= 0`.
        duration_sec: f64,
        /// The 1-indexed source line.
        source_line: u32,
    },
    /// Take a picture.
    Picture {
        /// The 1-indexed source line.
        source_line: u32,
    },
    /// Play a sound once.
    PlaySound {
        /// The sound's name, case preserved.
        name: String,
        /// How the sound blocks the action stream.
        mode: PlayMode,
        /// The 1-indexed source line.
        source_line: u32,
    },
    /// Loop a sound for a fixed duration.
    LoopSound {
        /// The sound's name, case preserved.
        name: String,
        /// The loop duration, in seconds.
        duration_sec: f64,
        /// The 1-indexed source line.
        source_line: u32,
    },
}

impl Ir {
    /// The 1-indexed source line this entry was derived from.
    #[must_use]
    pub const fn source_line(&self) -> u32 {
        match self {
            Self::Movement { source_line, .. }
            | Self::Wait { source_line, .. }
            | Self::Picture { source_line }
            | Self::PlaySound { source_line, .. }
            | Self::LoopSound { source_line, .. } => *source_line,
        }
    }

    /// Returns `true` if this is an [`Ir::Movement`] with every channel `None`.
    #[must_use]
    pub const fn is_noop_movement(&self) -> bool {
        matches!(
            self,
            Self::Movement {
                head_pose: None,
                antennas: None,
                body_yaw: None,
                ..
            }
        )
    }

    /// The wait duration, if this is an [`Ir::Wait`] entry.
    #[must_use]
    pub const fn wait_duration(&self) -> Option<f64> {
        match self {
            Self::Wait { duration_sec, .. } => Some(*duration_sec),
            _ => None,
        }
    }
}

#[allow(clippy::too_many_arguments)]
impl Ir {
    /// Builds an [`Ir::Movement`] entry.
    pub fn movement(
        head_pose: Option<Matrix4<f64>>,
        antennas: Option<(f64, f64)>,
        body_yaw: Option<f64>,
        duration_sec: f64,
        interpolation: Interp,
        source_line: u32,
        source_text: impl Into<String>,
    ) -> Self {
        Self::Movement {
            head_pose,
            antennas,
            body_yaw,
            duration_sec,
            interpolation,
            source_line,
            source_text: source_text.into(),
        }
    }
}
