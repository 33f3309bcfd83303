//! Shared closed-set value types used by both [`crate::rmscript::ast`] and
//! [`crate::rmscript::ir`].

use std::fmt;

use crate::rmscript::token::{DirectionWord, DurationKeyword, Keyword, StrengthLevel};

/// The five keywords that introduce a movement statement. A strict subset of
/// [`Keyword`]; `wait`, `repeat`, `picture`, `play`, and `loop` never head an
/// [`crate::rmscript::ast::ActionStmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKeyword {
    /// `look` — head yaw/pitch.
    Look,
    /// `turn` — body yaw.
    Turn,
    /// `head` — head translation.
    Head,
    /// `tilt` — head roll.
    Tilt,
    /// `antenna` — antenna pair.
    Antenna,
}

impl ActionKeyword {
    /// The lowercase spelling of this keyword, as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Turn => "turn",
            Self::Head => "head",
            Self::Tilt => "tilt",
            Self::Antenna => "antenna",
        }
    }
}

impl fmt::Display for ActionKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<Keyword> for ActionKeyword {
    type Error = ();

    fn try_from(value: Keyword) -> Result<Self, Self::Error> {
        match value {
            Keyword::Look => Ok(Self::Look),
            Keyword::Turn => Ok(Self::Turn),
            Keyword::Head => Ok(Self::Head),
            Keyword::Tilt => Ok(Self::Tilt),
            Keyword::Antenna => Ok(Self::Antenna),
            Keyword::Wait | Keyword::Repeat | Keyword::Picture | Keyword::Play | Keyword::Loop => {
                Err(())
            }
        }
    }
}

/// A direction, either a named word (`left`, `up`, ...) or a numeric antenna
/// clock position in `0..=12`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// A named direction word.
    Named(DirectionWord),
    /// A numeric antenna clock position, `0..=12`.
    Numeric(f64),
}

/// A magnitude, either given directly in source units (degrees or millimeters)
/// or as a qualitative level resolved later by the semantic analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strength {
    /// An explicit numeric magnitude, in source units.
    Numeric(f64),
    /// A qualitative level to be resolved per-channel.
    Qualitative(StrengthLevel),
}

/// A duration, either an explicit number of seconds or a named speed keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationSpec {
    /// An explicit duration in seconds.
    Seconds(f64),
    /// A duration-speed keyword.
    Keyword(DurationKeyword),
}

/// How a played or looped sound blocks (or doesn't) the action stream.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayMode {
    /// The sound plays in the background; the stream proceeds immediately.
    Async,
    /// The stream blocks until the sound finishes playing.
    BlockUntilDone,
    /// The stream blocks for a fixed number of seconds, independent of the
    /// sound's own length.
    BlockForSeconds(f64),
}
