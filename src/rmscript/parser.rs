//! Recursive-descent parser: token stream to [`Program`].

use crate::rmscript::ast::{
    ActionPart, ActionStmt, LoopSoundStmt, PictureStmt, PlaySoundStmt, Program, RepeatStmt,
    Statement, WaitStmt,
};
use crate::rmscript::diagnostics::{Diagnostic, ParseIssue};
use crate::rmscript::token::{DirectionWord, Keyword, Position, Token, TokenKind};
use crate::rmscript::values::{ActionKeyword, Direction, DurationSpec, PlayMode, Strength};

/// Parses a token stream into a [`Program`], recovering at newline
/// boundaries so a single malformed line does not discard the rest of the
/// script.
#[must_use]
pub fn parse(tokens: &[Token], source: &str, name: &str) -> (Program, Vec<Diagnostic>) {
    Parser::new(tokens, source, name).run()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    lines: Vec<&'a str>,
    name: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: &'a str, name: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            lines: source.lines().collect(),
            name: name.to_string(),
            diagnostics: Vec::new(),
        }
    }

    fn source_text_for(&self, line: u32) -> String {
        self.lines
            .get(line.saturating_sub(1) as usize)
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn is_eof(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn issue(&mut self, position: Position, issue: ParseIssue) {
        self.diagnostics
            .push(Diagnostic::from_parse_issue(position, issue));
    }

    /// Skips tokens until (and including) the next [`TokenKind::Newline`],
    /// or until [`TokenKind::Eof`]. Used to resynchronize after an error.
    fn recover_to_newline(&mut self) {
        loop {
            match self.peek_kind() {
                TokenKind::Newline => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn run(mut self) -> (Program, Vec<Diagnostic>) {
        let description = self.parse_description();
        let mut statements = Vec::new();
        while !self.is_eof() {
            if matches!(self.peek_kind(), TokenKind::Newline) {
                self.advance();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
        }
        let program = Program {
            name: self.name.clone(),
            description,
            statements,
        };
        (program, self.diagnostics)
    }

    fn parse_description(&mut self) -> Option<String> {
        let mut parts = Vec::new();
        while let TokenKind::Description(text) = self.peek_kind() {
            parts.push(text.clone());
            self.advance();
            if matches!(self.peek_kind(), TokenKind::Newline) {
                self.advance();
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Parses one top-level (or repeat-body) statement. Returns `None` if the
    /// statement was unparseable and no IR-worthy node survives.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.peek_kind().clone() {
            TokenKind::Keyword(Keyword::Look | Keyword::Turn | Keyword::Head | Keyword::Tilt | Keyword::Antenna) => {
                self.parse_action_stmt()
            }
            TokenKind::Keyword(Keyword::Wait) => self.parse_wait_stmt(),
            TokenKind::Keyword(Keyword::Picture) => self.parse_picture_stmt(),
            TokenKind::Keyword(Keyword::Play) => self.parse_play_stmt(),
            TokenKind::Keyword(Keyword::Loop) => self.parse_loop_stmt(),
            TokenKind::Keyword(Keyword::Repeat) => self.parse_repeat_stmt(),
            TokenKind::Description(_) => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::UnexpectedDescription);
                self.recover_to_newline();
                None
            }
            TokenKind::Indent => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::UnexpectedIndentation);
                self.advance();
                None
            }
            TokenKind::Dedent => {
                // Caller (repeat-body loop) handles Dedent; reaching here at
                // top level means an unmatched dedent. Just stop advancing
                // into it; let the caller observe it.
                None
            }
            other => {
                let position = self.peek().position;
                let text = self.peek().text.clone();
                let _ = other;
                self.issue(position, ParseIssue::UnknownKeyword { text });
                self.recover_to_newline();
                None
            }
        }
    }

    fn parse_action_stmt(&mut self) -> Option<Statement> {
        let head_token = self.advance().clone();
        let TokenKind::Keyword(head_keyword) = head_token.kind else {
            unreachable!("caller matched on Keyword")
        };
        let head = ActionKeyword::try_from(head_keyword).expect("action keyword");
        let source_line = head_token.position.line;
        let source_text = self.source_text_for(source_line);

        let mut parts = Vec::new();
        let mut current_keyword = head;

        // Each `parse_action_part` failure already resynchronizes to the
        // next newline, so a `None` here means recovery is complete and the
        // whole statement is abandoned immediately.
        parts.push(self.parse_action_part(current_keyword)?);

        while matches!(self.peek_kind(), TokenKind::And) {
            self.advance();
            if let TokenKind::Keyword(k) = self.peek_kind().clone() {
                match ActionKeyword::try_from(k) {
                    Ok(action_kw) => {
                        self.advance();
                        current_keyword = action_kw;
                    }
                    Err(()) => {
                        let position = self.peek().position;
                        self.issue(
                            position,
                            ParseIssue::AndWithNonMovement {
                                other: k.to_string(),
                            },
                        );
                        self.recover_to_newline();
                        return None;
                    }
                }
            }
            parts.push(self.parse_action_part(current_keyword)?);
        }

        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
            }
            TokenKind::Eof | TokenKind::Dedent => {}
            TokenKind::Keyword(Keyword::Picture | Keyword::Play | Keyword::Loop | Keyword::Wait) => {
                let kw_text = self.peek().text.clone();
                let position = self.peek().position;
                self.issue(position, ParseIssue::AndWithNonMovement { other: kw_text });
                self.recover_to_newline();
                return None;
            }
            _ => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::ExpectedEndOfLine);
                self.recover_to_newline();
                return None;
            }
        }

        Some(Statement::Action(ActionStmt {
            head,
            parts,
            source_line,
            source_text,
        }))
    }

    /// Legal direction words per keyword.
    fn legal_directions(keyword: ActionKeyword) -> &'static [DirectionWord] {
        use DirectionWord::{Back, Center, Down, Forward, Left, Right, Up};
        match keyword {
            ActionKeyword::Look => &[Left, Right, Up, Down, Center],
            ActionKeyword::Turn => &[Left, Right, Center],
            ActionKeyword::Head => &[Forward, Back, Left, Right, Up, Down],
            ActionKeyword::Tilt => &[Left, Right, Center],
            ActionKeyword::Antenna => &[DirectionWord::Both, Left, Right],
        }
    }

    fn legal_antenna_targets() -> &'static [DirectionWord] {
        use DirectionWord::{Down, Ext, High, Int, Left, Low, Right, Up};
        &[Left, Right, Up, Down, High, Low, Int, Ext]
    }

    fn parse_action_part(&mut self, keyword: ActionKeyword) -> Option<ActionPart> {
        let mut antenna_selector = None;
        if keyword == ActionKeyword::Antenna {
            antenna_selector = match self.peek_kind().clone() {
                TokenKind::Direction(word) if Self::legal_directions(keyword).contains(&word) => {
                    self.advance();
                    Some(word)
                }
                _ => {
                    let position = self.peek().position;
                    let text = self.peek().text.clone();
                    self.issue(
                        position,
                        ParseIssue::InvalidDirection {
                            word: text,
                            keyword: keyword.to_string(),
                        },
                    );
                    self.recover_to_newline();
                    return None;
                }
            };
        }

        let direction = match self.peek_kind().clone() {
            TokenKind::Direction(word) if keyword == ActionKeyword::Antenna => {
                if !Self::legal_antenna_targets().contains(&word) {
                    let position = self.peek().position;
                    self.issue(
                        position,
                        ParseIssue::InvalidAntennaTarget {
                            target: word.to_string(),
                        },
                    );
                    self.recover_to_newline();
                    return None;
                }
                self.advance();
                Direction::Named(word)
            }
            TokenKind::Number(n) if keyword == ActionKeyword::Antenna => {
                if !(0.0..=12.0).contains(&n) {
                    let position = self.peek().position;
                    self.issue(
                        position,
                        ParseIssue::InvalidAntennaTarget {
                            target: n.to_string(),
                        },
                    );
                    self.recover_to_newline();
                    return None;
                }
                self.advance();
                Direction::Numeric(n)
            }
            TokenKind::Direction(word) => {
                if !Self::legal_directions(keyword).contains(&word) {
                    let position = self.peek().position;
                    self.issue(
                        position,
                        ParseIssue::InvalidDirection {
                            word: word.to_string(),
                            keyword: keyword.to_string(),
                        },
                    );
                    self.recover_to_newline();
                    return None;
                }
                self.advance();
                Direction::Named(word)
            }
            _ => {
                let position = self.peek().position;
                let text = self.peek().text.clone();
                self.issue(
                    position,
                    ParseIssue::InvalidDirection {
                        word: text,
                        keyword: keyword.to_string(),
                    },
                );
                self.recover_to_newline();
                return None;
            }
        };

        let strength = match self.peek_kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Some(Strength::Numeric(n))
            }
            TokenKind::Strength(level) => {
                self.advance();
                Some(Strength::Qualitative(level))
            }
            _ => None,
        };

        let duration = match self.peek_kind().clone() {
            TokenKind::Duration(secs) => {
                self.advance();
                Some(DurationSpec::Seconds(secs))
            }
            TokenKind::DurationKeyword(kw) => {
                self.advance();
                Some(DurationSpec::Keyword(kw))
            }
            _ => None,
        };

        Some(ActionPart {
            keyword,
            direction,
            antenna_selector,
            strength,
            duration,
        })
    }

    fn parse_wait_stmt(&mut self) -> Option<Statement> {
        let keyword_token = self.advance().clone();
        let source_line = keyword_token.position.line;
        let seconds = match self.peek_kind().clone() {
            TokenKind::Duration(secs) => {
                self.advance();
                secs
            }
            TokenKind::Number(_) => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::WaitMissingSuffix);
                self.recover_to_newline();
                return None;
            }
            _ => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::WaitMissingDuration);
                self.recover_to_newline();
                return None;
            }
        };
        self.expect_end_of_statement();
        Some(Statement::Wait(WaitStmt { seconds, source_line }))
    }

    fn parse_picture_stmt(&mut self) -> Option<Statement> {
        let keyword_token = self.advance().clone();
        let source_line = keyword_token.position.line;
        self.expect_end_of_statement();
        Some(Statement::Picture(PictureStmt { source_line }))
    }

    fn parse_play_stmt(&mut self) -> Option<Statement> {
        let keyword_token = self.advance().clone();
        let source_line = keyword_token.position.line;
        let name = match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                name
            }
            _ => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::MissingSoundName { keyword: "play" });
                self.recover_to_newline();
                return None;
            }
        };
        let mode = match self.peek_kind().clone() {
            TokenKind::Duration(secs) => {
                self.advance();
                PlayMode::BlockForSeconds(secs)
            }
            TokenKind::BlockModifier | TokenKind::Keyword(Keyword::Wait) => {
                self.advance();
                PlayMode::BlockUntilDone
            }
            _ => PlayMode::Async,
        };
        self.expect_end_of_statement();
        Some(Statement::PlaySound(PlaySoundStmt {
            name,
            mode,
            source_line,
        }))
    }

    fn parse_loop_stmt(&mut self) -> Option<Statement> {
        let keyword_token = self.advance().clone();
        let source_line = keyword_token.position.line;
        let name = match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                name
            }
            _ => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::MissingSoundName { keyword: "loop" });
                self.recover_to_newline();
                return None;
            }
        };
        let seconds = match self.peek_kind().clone() {
            TokenKind::Duration(secs) => {
                self.advance();
                secs
            }
            _ => 10.0,
        };
        self.expect_end_of_statement();
        Some(Statement::LoopSound(LoopSoundStmt {
            name,
            seconds,
            source_line,
        }))
    }

    fn parse_repeat_stmt(&mut self) -> Option<Statement> {
        let keyword_token = self.advance().clone();
        let source_line = keyword_token.position.line;
        let count = match self.peek_kind().clone() {
            TokenKind::Number(n) if n >= 0.0 && n.fract() == 0.0 => {
                self.advance();
                n as u32
            }
            _ => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::InvalidRepeatCount);
                self.recover_to_newline();
                return None;
            }
        };

        if !matches!(self.peek_kind(), TokenKind::Newline) {
            let position = self.peek().position;
            self.issue(position, ParseIssue::ExpectedEndOfLine);
            self.recover_to_newline();
            return None;
        }
        self.advance();

        if !matches!(self.peek_kind(), TokenKind::Indent) {
            let position = self.peek().position;
            self.issue(position, ParseIssue::MissingRepeatBlock);
            return None;
        }
        self.advance();

        let mut body = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Dedent => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    let position = self.peek().position;
                    self.issue(position, ParseIssue::UnexpectedEofInBlock);
                    break;
                }
                TokenKind::Newline => {
                    self.advance();
                }
                _ => {
                    if let Some(stmt) = self.parse_statement() {
                        body.push(stmt);
                    }
                }
            }
        }

        Some(Statement::Repeat(RepeatStmt {
            count,
            body,
            source_line,
        }))
    }

    fn expect_end_of_statement(&mut self) {
        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
            }
            TokenKind::Eof | TokenKind::Dedent => {}
            _ => {
                let position = self.peek().position;
                self.issue(position, ParseIssue::ExpectedEndOfLine);
                self.recover_to_newline();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rmscript::lexer::lex;

    fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
        let (tokens, lex_diags) = lex(source);
        assert!(lex_diags.is_empty(), "{lex_diags:?}");
        parse(&tokens, source, "test")
    }

    #[test]
    fn simple_look_left() {
        let (program, diags) = parse_source("look left\n");
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(program.statements.len(), 1);
        let Statement::Action(stmt) = &program.statements[0] else {
            panic!("expected action statement");
        };
        assert_eq!(stmt.parts.len(), 1);
        assert_eq!(stmt.parts[0].direction, Direction::Named(DirectionWord::Left));
    }

    #[test]
    fn and_reuses_head_keyword() {
        let (program, diags) = parse_source("look left and up\n");
        assert!(diags.is_empty(), "{diags:?}");
        let Statement::Action(stmt) = &program.statements[0] else {
            panic!()
        };
        assert_eq!(stmt.parts.len(), 2);
        assert_eq!(stmt.parts[1].keyword, ActionKeyword::Look);
    }

    #[test]
    fn and_can_override_keyword() {
        let (program, _) = parse_source("turn left and look right\n");
        let Statement::Action(stmt) = &program.statements[0] else {
            panic!()
        };
        assert_eq!(stmt.parts[0].keyword, ActionKeyword::Turn);
        assert_eq!(stmt.parts[1].keyword, ActionKeyword::Look);
    }

    #[test]
    fn and_with_non_movement_is_error() {
        let (program, diags) = parse_source("look left and picture\n");
        assert!(program.statements.is_empty());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("Cannot combine movement"));
    }

    #[test]
    fn invalid_direction_is_error() {
        let (program, diags) = parse_source("turn up\n");
        assert!(program.statements.is_empty());
        assert!(diags[0].message.contains("Invalid direction"));
    }

    #[test]
    fn wait_without_s_is_error() {
        let (program, diags) = parse_source("wait 5\n");
        assert!(program.statements.is_empty());
        assert!(diags[0].message.contains("duration"));
    }

    #[test]
    fn repeat_parses_body() {
        let (program, diags) = parse_source("repeat 2\n    look left\n    wait 0.5s\n");
        assert!(diags.is_empty(), "{diags:?}");
        let Statement::Repeat(stmt) = &program.statements[0] else {
            panic!()
        };
        assert_eq!(stmt.count, 2);
        assert_eq!(stmt.body.len(), 2);
    }

    #[test]
    fn repeat_fractional_count_is_error() {
        let (program, diags) = parse_source("repeat 2.5\n    wait 1s\n");
        assert!(program.statements.is_empty());
        assert!(diags[0].message.contains("non-negative integer"));
    }

    #[test]
    fn repeat_without_block_is_error() {
        let (_, diags) = parse_source("repeat 1\nwait 1s\n");
        assert!(diags.iter().any(|d| d.message.contains("Expected indented block")));
    }

    #[test]
    fn description_header_concatenates() {
        let (program, _) = parse_source("DESCRIPTION part one\nDESCRIPTION part two\nlook left\n");
        assert_eq!(program.description.as_deref(), Some("part one part two"));
    }

    #[test]
    fn antenna_selector_and_target() {
        let (program, diags) = parse_source("antenna both up\n");
        assert!(diags.is_empty(), "{diags:?}");
        let Statement::Action(stmt) = &program.statements[0] else {
            panic!()
        };
        assert_eq!(stmt.parts[0].antenna_selector, Some(DirectionWord::Both));
        assert_eq!(stmt.parts[0].direction, Direction::Named(DirectionWord::Up));
    }

    #[test]
    fn play_with_block_modifier() {
        let (program, diags) = parse_source("play Beep fully\n");
        assert!(diags.is_empty(), "{diags:?}");
        let Statement::PlaySound(stmt) = &program.statements[0] else {
            panic!()
        };
        assert_eq!(stmt.name, "Beep");
        assert_eq!(stmt.mode, PlayMode::BlockUntilDone);
    }

    #[test]
    fn loop_defaults_to_ten_seconds() {
        let (program, _) = parse_source("loop Ambient\n");
        let Statement::LoopSound(stmt) = &program.statements[0] else {
            panic!()
        };
        assert_eq!(stmt.seconds, 10.0);
    }
}
