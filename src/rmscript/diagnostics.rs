//! Structured diagnostics shared by every compiler phase.

use std::fmt;

use thiserror::Error;

use crate::rmscript::token::Position;

/// The closed set of error kinds the lexer can report.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexIssue {
    /// Tabs and spaces were mixed inconsistently within one leading-whitespace
    /// run, or a dedent did not match any enclosing indentation level.
    #[error("Inconsistent indentation")]
    InconsistentIndentation,
    /// A character did not begin any recognized token and was skipped.
    #[error("Unrecognized character '{character}'")]
    UnrecognizedCharacter {
        /// The character that was skipped.
        character: char,
    },
    /// A digit run failed to parse as a number (unreachable in practice since
    /// the lexer only accumulates `[0-9]` and `.`, kept for completeness).
    #[error("Malformed number literal '{text}'")]
    MalformedNumber {
        /// The offending lexeme.
        text: String,
    },
}

/// The closed set of error kinds the parser can report.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseIssue {
    /// A `DESCRIPTION` header appeared somewhere other than the top of the file.
    #[error("Unexpected DESCRIPTION header")]
    UnexpectedDescription,
    /// An INDENT token appeared where a statement was expected.
    #[error("Unexpected indentation")]
    UnexpectedIndentation,
    /// The first token of a statement was not a recognized statement keyword.
    #[error("Unknown keyword '{text}'")]
    UnknownKeyword {
        /// The unrecognized lexeme.
        text: String,
    },
    /// A direction word is not legal for the given action keyword.
    #[error("Invalid direction '{word}' for keyword '{keyword}'")]
    InvalidDirection {
        /// The offending direction word or lexeme.
        word: String,
        /// The action keyword it was illegal for.
        keyword: String,
    },
    /// An antenna target word or clock number is outside the legal set.
    #[error("Invalid antenna target '{target}'")]
    InvalidAntennaTarget {
        /// The offending target lexeme.
        target: String,
    },
    /// `and` joined a movement with a non-movement statement.
    #[error("Cannot combine movement with '{other}' using 'and'. Use separate lines instead.")]
    AndWithNonMovement {
        /// The non-movement keyword that followed `and`.
        other: String,
    },
    /// `wait` was followed by a bare number lacking the `s` suffix.
    #[error("'wait' requires a duration with an 's' suffix, e.g. '1.5s'")]
    WaitMissingSuffix,
    /// `wait` was not followed by any duration.
    #[error("Expected a duration after 'wait'")]
    WaitMissingDuration,
    /// `play` or `loop` was not followed by a sound name.
    #[error("Expected a sound name after '{keyword}'")]
    MissingSoundName {
        /// The keyword (`play` or `loop`) the name was expected after.
        keyword: &'static str,
    },
    /// `repeat` was not followed by a non-negative integer count.
    #[error("Repeat count must be a non-negative integer")]
    InvalidRepeatCount,
    /// `repeat`'s body was not introduced by an indented block.
    #[error("Expected indented block after 'repeat'")]
    MissingRepeatBlock,
    /// End-of-file was reached before a `repeat` block's matching dedent.
    #[error("Unexpected end of file inside 'repeat' block")]
    UnexpectedEofInBlock,
    /// A statement was not terminated where a newline, dedent, or EOF was expected.
    #[error("Expected end of line")]
    ExpectedEndOfLine,
}

/// The closed set of error and warning kinds the semantic analyzer can report.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticIssue {
    /// Two parts of one merged movement wrote to the same fine-grained channel.
    #[error("Conflicting writes to channel {channel}")]
    ConflictingChannelWrite {
        /// The channel both parts addressed (`Debug` spelling of the internal
        /// `Channel` enum, e.g. `"HeadYaw"`).
        channel: String,
    },
    /// A resolved magnitude exceeded its channel's warn threshold. Compilation
    /// still succeeds; the IR carries the originally requested value.
    #[error("{label} {value:.1}{unit} exceeds safe range (\u{00b1}{threshold:.1}{unit}), will be clamped")]
    PhysicalLimitExceeded {
        /// The human-readable channel label (`"Body yaw"`, `"Head X"`, ...).
        label: String,
        /// The signed requested magnitude, in source units.
        value: f64,
        /// The warn threshold for this channel, in source units.
        threshold: f64,
        /// The unit suffix (`"°"` or `"mm"`).
        unit: String,
    },
    /// An antenna angle exceeded the hard physical ceiling beyond which no
    /// hardware can move, distinct from (and in addition to) the ordinary
    /// safe-range warning. Compilation still succeeds; the IR carries the
    /// originally requested value.
    #[error(
        "Antenna angle {value:.1}\u{00b0} exceeds the hard physical ceiling (\u{00b1}{ceiling:.1}\u{00b0}), will be clamped"
    )]
    AntennaExceedsHardCeiling {
        /// The signed requested antenna angle, in degrees.
        value: f64,
        /// The hard physical ceiling, in degrees.
        ceiling: f64,
    },
}

/// The severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Fails compilation; `CompilationResult::success` is `false` if any are present.
    Error,
    /// Compilation still succeeds; surfaced for the caller's attention.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A single diagnostic message produced by a compiler phase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// 1-indexed source line.
    pub line: u32,
    /// 1-indexed source column.
    pub column: u32,
    /// Human-readable message text.
    pub message: String,
    /// Whether this diagnostic fails compilation.
    pub severity: Severity,
}

impl Diagnostic {
    /// Builds an error diagnostic at `position`.
    #[must_use]
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        Self {
            line: position.line,
            column: position.column,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Builds a warning diagnostic at `position`.
    #[must_use]
    pub fn warning(position: Position, message: impl Into<String>) -> Self {
        Self {
            line: position.line,
            column: position.column,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Builds an error diagnostic from a [`LexIssue`] at `position`.
    #[must_use]
    pub fn from_lex_issue(position: Position, issue: LexIssue) -> Self {
        Self::error(position, issue.to_string())
    }

    /// Builds an error diagnostic from a [`ParseIssue`] at `position`.
    #[must_use]
    pub fn from_parse_issue(position: Position, issue: ParseIssue) -> Self {
        Self::error(position, issue.to_string())
    }

    /// Builds an error diagnostic from a [`SemanticIssue::ConflictingChannelWrite`]
    /// at `position`.
    #[must_use]
    pub fn semantic_error(position: Position, issue: SemanticIssue) -> Self {
        Self::error(position, issue.to_string())
    }

    /// Builds a warning diagnostic from a [`SemanticIssue::PhysicalLimitExceeded`]
    /// at `position`.
    #[must_use]
    pub fn semantic_warning(position: Position, issue: SemanticIssue) -> Self {
        Self::warning(position, issue.to_string())
    }

    /// `true` if this diagnostic is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (line {}, column {})",
            self.severity, self.message, self.line, self.column
        )
    }
}

/// Optional `ariadne`-backed pretty printing, mirroring the way `bms-rs`
/// guards its own diagnostics rendering behind the `diagnostics` feature.
#[cfg(feature = "diagnostics")]
pub mod ariadne_support {
    use ariadne::{Label, Report, ReportKind, Source};

    use super::{Diagnostic, Severity};

    /// A named source container, analogous to `bms::diagnostics::SimpleSource`.
    pub struct SimpleSource<'a> {
        name: &'a str,
        text: &'a str,
    }

    impl<'a> SimpleSource<'a> {
        /// Creates a new [`SimpleSource`].
        #[must_use]
        pub const fn new(name: &'a str, text: &'a str) -> Self {
            Self { name, text }
        }
    }

    /// Converts a [`Diagnostic`] to an `ariadne::Report` against `src`.
    pub fn to_report<'a>(
        diagnostic: &Diagnostic,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let offset = line_column_to_byte_offset(src.text, diagnostic.line, diagnostic.column);
        let kind = match diagnostic.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        Report::build(kind, (src.name.to_string(), offset..offset + 1))
            .with_message(diagnostic.message.clone())
            .with_label(Label::new((src.name.to_string(), offset..offset + 1)))
            .finish()
    }

    fn line_column_to_byte_offset(text: &str, line: u32, column: u32) -> usize {
        let mut offset = 0;
        for (idx, source_line) in text.split_inclusive('\n').enumerate() {
            if idx as u32 + 1 == line {
                let col_offset: usize = source_line
                    .chars()
                    .take(column.saturating_sub(1) as usize)
                    .map(char::len_utf8)
                    .sum();
                return offset + col_offset;
            }
            offset += source_line.len();
        }
        offset
    }

    /// Renders every diagnostic in `diagnostics` against `source`, in order.
    pub fn emit_diagnostics<'a>(
        name: &'a str,
        source: &'a str,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    ) {
        let src = SimpleSource::new(name, source);
        let ariadne_source = Source::from(source);
        for diagnostic in diagnostics {
            let report = to_report(diagnostic, &src);
            let _ = report.print((name.to_string(), ariadne_source.clone()));
        }
    }
}
