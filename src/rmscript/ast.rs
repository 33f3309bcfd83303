//! Abstract syntax tree produced by [`crate::rmscript::parser`].

use crate::rmscript::token::DirectionWord;
use crate::rmscript::values::{ActionKeyword, Direction, DurationSpec, PlayMode, Strength};

/// A complete rmscript program: a name, an optional description, and an
/// ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    /// The script's name, derived from the filename or supplied by the caller.
    pub name: String,
    /// The concatenation of any leading `DESCRIPTION` lines, space-joined.
    pub description: Option<String>,
    /// The top-level statements, in source order.
    pub statements: Vec<Statement>,
}

/// One part of an [`ActionStmt`]: a direction with an optional strength and duration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPart {
    /// The keyword this part is effectively addressed to — the statement's own
    /// head keyword, or an overriding keyword named on an `and` part, or the
    /// previous part's keyword when an `and` part names none (keyword reuse).
    pub keyword: ActionKeyword,
    /// The direction this part specifies: a named direction word for every
    /// non-antenna keyword, or (for `antenna` parts) the antenna *target* —
    /// either a named clock/directional keyword or a numeric clock position.
    pub direction: Direction,
    /// The antenna *selector* (`both`/`left`/`right`) that preceded the
    /// target. Only ever `Some` for `antenna` parts.
    pub antenna_selector: Option<DirectionWord>,
    /// The strength this part specifies, if any.
    pub strength: Option<Strength>,
    /// The duration this part specifies, if any.
    pub duration: Option<DurationSpec>,
}

/// A movement statement: a head keyword followed by one or more `and`-joined parts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionStmt {
    /// The keyword that headed the statement (before any `and`-reuse or override).
    pub head: ActionKeyword,
    /// The sibling parts, in source order.
    pub parts: Vec<ActionPart>,
    /// The 1-indexed source line this statement started on.
    pub source_line: u32,
    /// The original source text of this statement's line.
    pub source_text: String,
}

/// `wait Ns`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitStmt {
    /// The number of seconds to wait.
    pub seconds: f64,
    /// The 1-indexed source line.
    pub source_line: u32,
}

/// `picture`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PictureStmt {
    /// The 1-indexed source line.
    pub source_line: u32,
}

/// `play NAME [MODIFIER | Ns]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaySoundStmt {
    /// The sound's name, case preserved.
    pub name: String,
    /// How the sound blocks the action stream.
    pub mode: PlayMode,
    /// The 1-indexed source line.
    pub source_line: u32,
}

/// `loop NAME [Ns]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopSoundStmt {
    /// The sound's name, case preserved.
    pub name: String,
    /// How long to loop the sound for; defaults to 10.0 when unspecified.
    pub seconds: f64,
    /// The 1-indexed source line.
    pub source_line: u32,
}

/// `repeat N` followed by an indented block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatStmt {
    /// The number of times to repeat the body.
    pub count: u32,
    /// The repeated statements, in source order.
    pub body: Vec<Statement>,
    /// The 1-indexed source line of the `repeat` keyword.
    pub source_line: u32,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// A movement statement.
    Action(ActionStmt),
    /// A wait statement.
    Wait(WaitStmt),
    /// A picture statement.
    Picture(PictureStmt),
    /// A play-sound statement.
    PlaySound(PlaySoundStmt),
    /// A loop-sound statement.
    LoopSound(LoopSoundStmt),
    /// A repeat block.
    Repeat(RepeatStmt),
}

impl Statement {
    /// The 1-indexed source line this statement started on.
    #[must_use]
    pub const fn source_line(&self) -> u32 {
        match self {
            Self::Action(s) => s.source_line,
            Self::Wait(s) => s.source_line,
            Self::Picture(s) => s.source_line,
            Self::PlaySound(s) => s.source_line,
            Self::LoopSound(s) => s.source_line,
            Self::Repeat(s) => s.source_line,
        }
    }
}
