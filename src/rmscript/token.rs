//! Token definitions and source-position tracking for rmscript.

use std::fmt;

/// A 1-indexed position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number of char count (not byte count), starting at 1.
    pub column: u32,
}

impl Position {
    /// Creates a new [`Position`].
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The action-verb and control keywords of rmscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
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
    /// `wait` — pause for a duration.
    Wait,
    /// `repeat` — bounded repetition block.
    Repeat,
    /// `picture` — take a picture.
    Picture,
    /// `play` — play a sound once.
    Play,
    /// `loop` — loop a sound for a duration.
    Loop,
}

impl Keyword {
    /// Matches a word against the ten reserved action/control keywords, case-insensitively.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match_ignore_case! { word,
            "look" => Self::Look,
            "turn" => Self::Turn,
            "head" => Self::Head,
            "tilt" => Self::Tilt,
            "antenna" => Self::Antenna,
            "wait" => Self::Wait,
            "repeat" => Self::Repeat,
            "picture" => Self::Picture,
            "play" => Self::Play,
            "loop" => Self::Loop,
        })
    }

    /// The lowercase spelling of this keyword, as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Turn => "turn",
            Self::Head => "head",
            Self::Tilt => "tilt",
            Self::Antenna => "antenna",
            Self::Wait => "wait",
            Self::Repeat => "repeat",
            Self::Picture => "picture",
            Self::Play => "play",
            Self::Loop => "loop",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direction word, after synonym normalization (`straight`/`neutral` fold into
/// [`DirectionWord::Center`], `backward`/`backwards` fold into [`DirectionWord::Back`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionWord {
    /// `left`
    Left,
    /// `right`
    Right,
    /// `up`
    Up,
    /// `down`
    Down,
    /// `center` / `straight` / `neutral`
    Center,
    /// `forward`
    Forward,
    /// `back` / `backward` / `backwards`
    Back,
    /// `high` (antenna clock keyword)
    High,
    /// `low` (antenna clock keyword)
    Low,
    /// `int` (antenna clock keyword)
    Int,
    /// `ext` (antenna clock keyword)
    Ext,
    /// `both` (antenna selector)
    Both,
}

impl DirectionWord {
    /// Matches a word against the direction vocabulary, case-insensitively,
    /// folding synonyms to their canonical variant.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match_ignore_case! { word,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "center" => Self::Center,
            "straight" => Self::Center,
            "neutral" => Self::Center,
            "forward" => Self::Forward,
            "back" => Self::Back,
            "backward" => Self::Back,
            "backwards" => Self::Back,
            "high" => Self::High,
            "low" => Self::Low,
            "int" => Self::Int,
            "ext" => Self::Ext,
            "both" => Self::Both,
        })
    }

    /// The canonical lowercase spelling, as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::Center => "center",
            Self::Forward => "forward",
            Self::Back => "back",
            Self::High => "high",
            Self::Low => "low",
            Self::Int => "int",
            Self::Ext => "ext",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for DirectionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A qualitative strength level, resolved to a numeric magnitude by the semantic
/// analyzer through a per-channel lookup table (see [`crate::rmscript::semantic::tables`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrengthLevel {
    /// `tiny`
    VerySmall,
    /// `small`
    Small,
    /// `medium`
    Medium,
    /// `large`
    Large,
    /// `huge` / `maximum`
    VeryLarge,
}

impl StrengthLevel {
    /// Matches a word against the qualitative-strength vocabulary, case-insensitively.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match_ignore_case! { word,
            "tiny" => Self::VerySmall,
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "huge" => Self::VeryLarge,
            "maximum" => Self::VeryLarge,
        })
    }
}

/// A duration-speed keyword, resolved to a fixed number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationKeyword {
    /// `superfast` → 0.2s
    SuperFast,
    /// `fast` → 0.5s
    Fast,
    /// `slow` / `slowly` → 2.0s
    Slow,
    /// `superslow` → 3.0s
    SuperSlow,
}

impl DurationKeyword {
    /// Matches a word against the duration-keyword vocabulary, case-insensitively.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match_ignore_case! { word,
            "superfast" => Self::SuperFast,
            "fast" => Self::Fast,
            "slow" => Self::Slow,
            "slowly" => Self::Slow,
            "superslow" => Self::SuperSlow,
        })
    }

    /// The fixed number of seconds this keyword resolves to.
    #[must_use]
    pub const fn seconds(self) -> f64 {
        match self {
            Self::SuperFast => 0.2,
            Self::Fast => 0.5,
            Self::Slow => 2.0,
            Self::SuperSlow => 3.0,
        }
    }
}

/// Returns `true` when `word` is one of the sound-blocking modifiers that do not
/// reuse an existing keyword (`pause`, `fully`, `block`, `complete`). The fifth
/// modifier, `wait`, lexes as [`Keyword::Wait`] and is recognized contextually by
/// the parser instead.
#[must_use]
pub fn is_block_modifier_word(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().as_str(),
        "pause" | "fully" | "block" | "complete"
    )
}

/// The kind and payload of a token.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// One of the ten action/control keywords.
    Keyword(Keyword),
    /// A direction word.
    Direction(DirectionWord),
    /// A numeric literal, e.g. `25` or `0.5`.
    Number(f64),
    /// A duration literal, e.g. `0.5s`.
    Duration(f64),
    /// A sound name; case is preserved.
    Identifier(String),
    /// A qualitative strength keyword.
    Strength(StrengthLevel),
    /// A duration-speed keyword.
    DurationKeyword(DurationKeyword),
    /// The word `and`, joining sibling action parts.
    And,
    /// A `DESCRIPTION` header line's trimmed text.
    Description(String),
    /// One of `pause`, `fully`, `block`, `complete`.
    BlockModifier,
    /// End of a logical line.
    Newline,
    /// A rise in indentation width.
    Indent,
    /// A fall in indentation width.
    Dedent,
    /// End of input.
    Eof,
}

/// A token: its kind, the literal text as it appeared in source, and its start position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The kind and payload of this token.
    pub kind: TokenKind,
    /// The literal text as it appeared in the source.
    pub text: String,
    /// The position of the first character of this token.
    pub position: Position,
}

impl Token {
    /// Creates a new [`Token`].
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

/// Matches `$word` (case-insensitively, via `eq_ignore_ascii_case`) against a list
/// of string-literal arms, evaluating to the first matching arm's expression.
/// Small local stand-in for a `match` over lowercase strings that avoids an
/// intermediate allocation on every lexer call.
macro_rules! match_ignore_case {
    ($word:expr, $( $lit:literal => $value:expr ),+ $(,)?) => {{
        let word = $word;
        $( if word.eq_ignore_ascii_case($lit) { $value } else )+
        { return None; }
    }};
}
pub(crate) use match_ignore_case;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_case_insensitive() {
        assert_eq!(Keyword::from_word("LOOK"), Some(Keyword::Look));
        assert_eq!(Keyword::from_word("Repeat"), Some(Keyword::Repeat));
        assert_eq!(Keyword::from_word("bogus"), None);
    }

    #[test]
    fn direction_synonyms_fold() {
        assert_eq!(DirectionWord::from_word("straight"), Some(DirectionWord::Center));
        assert_eq!(DirectionWord::from_word("neutral"), Some(DirectionWord::Center));
        assert_eq!(DirectionWord::from_word("backwards"), Some(DirectionWord::Back));
    }

    #[test]
    fn strength_words() {
        assert_eq!(StrengthLevel::from_word("huge"), Some(StrengthLevel::VeryLarge));
        assert_eq!(StrengthLevel::from_word("maximum"), Some(StrengthLevel::VeryLarge));
    }

    #[test]
    fn duration_keyword_seconds() {
        assert_eq!(DurationKeyword::from_word("slowly").unwrap().seconds(), 2.0);
        assert_eq!(DurationKeyword::from_word("superfast").unwrap().seconds(), 0.2);
    }

    #[test]
    fn block_modifier_words() {
        assert!(is_block_modifier_word("Pause"));
        assert!(is_block_modifier_word("COMPLETE"));
        assert!(!is_block_modifier_word("wait"));
    }
}
