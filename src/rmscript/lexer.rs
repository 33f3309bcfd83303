//! Lexical analysis: source text to a token stream with significant indentation.

use crate::rmscript::cursor::Cursor;
use crate::rmscript::diagnostics::{Diagnostic, LexIssue};
use crate::rmscript::token::{
    DirectionWord, DurationKeyword, Keyword, Position, StrengthLevel, Token, TokenKind,
    is_block_modifier_word,
};

/// Tab width, in columns, used when measuring indentation.
const TAB_WIDTH: u32 = 4;

/// Tokenizes `source` into a flat token stream, honoring significant
/// indentation. Always produces a token stream, even in the presence of
/// errors; bad characters are skipped and recorded as diagnostics so that
/// lexing never aborts early.
#[must_use]
pub fn lex(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    indent_stack: Vec<u32>,
    at_line_start: bool,
    first_word_of_line: bool,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            indent_stack: vec![0],
            at_line_start: true,
            first_word_of_line: true,
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.cursor.line(), self.cursor.column())
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, position: Position) {
        self.tokens.push(Token::new(kind, text, position));
    }

    fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while !self.cursor.is_end() {
            if self.at_line_start {
                self.handle_line_start();
            } else {
                self.handle_line_body();
            }
        }
        if !self.at_line_start {
            let position = self.pos();
            self.push(TokenKind::Newline, "\n", position);
        }
        while self.indent_stack.last().copied().unwrap_or(0) > 0 {
            self.indent_stack.pop();
            let position = self.pos();
            self.push(TokenKind::Dedent, "", position);
        }
        let position = self.pos();
        self.push(TokenKind::Eof, "", position);
        (self.tokens, self.diagnostics)
    }

    /// Measures leading indentation, skips blank/comment-only lines, and
    /// emits Indent/Dedent for content lines.
    fn handle_line_start(&mut self) {
        let mut width = 0u32;
        let mut saw_space = false;
        let mut saw_tab = false;
        let mut inconsistent = false;
        while let Some(c) = self.cursor.peek() {
            match c {
                ' ' => {
                    if saw_tab {
                        inconsistent = true;
                    }
                    width += 1;
                    saw_space = true;
                    self.cursor.advance();
                }
                '\t' => {
                    if saw_space {
                        inconsistent = true;
                    }
                    width += TAB_WIDTH;
                    saw_tab = true;
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        match self.cursor.peek() {
            None => {}
            Some('\n') => {
                self.cursor.advance();
            }
            Some('#') => {
                self.cursor.take_while(|c| c != '\n');
                if self.cursor.peek() == Some('\n') {
                    self.cursor.advance();
                }
            }
            Some(_) => {
                if inconsistent {
                    self.diagnostics.push(Diagnostic::from_lex_issue(
                        Position::new(self.cursor.line(), 1),
                        LexIssue::InconsistentIndentation,
                    ));
                }
                self.apply_indent(width);
                self.at_line_start = false;
                self.first_word_of_line = true;
            }
        }
    }

    fn apply_indent(&mut self, width: u32) {
        let top = *self.indent_stack.last().unwrap_or(&0);
        if width > top {
            self.indent_stack.push(width);
            let position = self.pos();
            self.push(TokenKind::Indent, "", position);
        } else if width < top {
            while *self.indent_stack.last().unwrap_or(&0) > width {
                self.indent_stack.pop();
                let position = self.pos();
                self.push(TokenKind::Dedent, "", position);
            }
            if self.indent_stack.last().copied().unwrap_or(0) != width {
                self.diagnostics.push(Diagnostic::from_lex_issue(
                    Position::new(self.cursor.line(), 1),
                    LexIssue::InconsistentIndentation,
                ));
                self.indent_stack.push(width);
            }
        }
    }

    /// Tokenizes the body of a logical line: words, numbers, `and`, etc.,
    /// until the terminating newline.
    fn handle_line_body(&mut self) {
        while matches!(self.cursor.peek(), Some(' ' | '\t')) {
            self.cursor.advance();
        }
        match self.cursor.peek() {
            None => {}
            Some('\n') => {
                let position = self.pos();
                self.cursor.advance();
                self.push(TokenKind::Newline, "\n", position);
                self.at_line_start = true;
            }
            Some('#') => {
                self.cursor.take_while(|c| c != '\n');
            }
            Some(c) if c.is_ascii_digit() => self.lex_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.lex_word(),
            Some(c) => {
                self.diagnostics.push(Diagnostic::from_lex_issue(
                    self.pos(),
                    LexIssue::UnrecognizedCharacter { character: c },
                ));
                self.cursor.advance();
            }
        }
    }

    fn lex_number(&mut self) {
        let position = self.pos();
        let mut text = String::from(self.cursor.take_while(|c| c.is_ascii_digit()));
        if self.cursor.peek() == Some('.') && self.cursor.peek2().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            text.push('.');
            text.push_str(self.cursor.take_while(|c| c.is_ascii_digit()));
        }
        let Ok(value) = text.parse::<f64>() else {
            self.diagnostics.push(Diagnostic::from_lex_issue(
                position,
                LexIssue::MalformedNumber { text: text.clone() },
            ));
            self.first_word_of_line = false;
            return;
        };

        let is_duration_suffix = matches!(self.cursor.peek(), Some('s' | 'S'))
            && !self
                .cursor
                .peek2()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if is_duration_suffix {
            self.cursor.advance();
            text.push('s');
            self.push(TokenKind::Duration(value), text, position);
        } else {
            self.push(TokenKind::Number(value), text, position);
        }
        self.first_word_of_line = false;
    }

    fn lex_word(&mut self) {
        let position = self.pos();
        let first_word = self.first_word_of_line;
        self.first_word_of_line = false;

        if first_word {
            // Consume the first word of the line to test for DESCRIPTION; if it
            // isn't, classify the word we already consumed instead of re-lexing it.
            // Keywords never contain filename characters, so the narrower charset
            // is enough here and avoids swallowing punctuation that follows a
            // command word with no separating space.
            let word = self.cursor.take_while(|c| c.is_alphanumeric() || c == '_');
            if word.eq_ignore_ascii_case("description") {
                while matches!(self.cursor.peek(), Some(' ' | '\t')) {
                    self.cursor.advance();
                }
                let mut rest = String::from(self.cursor.take_while(|c| c != '\n'));
                if let Some(hash) = rest.find('#') {
                    rest.truncate(hash);
                }
                let text = rest.trim().to_string();
                self.push(TokenKind::Description(text.clone()), text, position);
                return;
            }
            self.classify_and_push(word, position);
            return;
        }

        // Sound names are commonly filenames (`Beep.wav`, `ambient-loop.mp3`);
        // widen the charset so a dot or hyphen doesn't end the word early. No
        // keyword, direction, or other reserved word contains either
        // character, so this only ever affects identifiers.
        let word = self
            .cursor
            .take_while(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '-');
        self.classify_and_push(word, position);
    }

    fn classify_and_push(&mut self, word: &str, position: Position) {
        if word.eq_ignore_ascii_case("and") {
            self.push(TokenKind::And, word, position);
        } else if let Some(keyword) = Keyword::from_word(word) {
            self.push(TokenKind::Keyword(keyword), word, position);
        } else if let Some(direction) = DirectionWord::from_word(word) {
            self.push(TokenKind::Direction(direction), word, position);
        } else if is_block_modifier_word(word) {
            self.push(TokenKind::BlockModifier, word, position);
        } else if let Some(level) = StrengthLevel::from_word(word) {
            self.push(TokenKind::Strength(level), word, position);
        } else if let Some(keyword) = DurationKeyword::from_word(word) {
            self.push(TokenKind::DurationKeyword(keyword), word, position);
        } else {
            self.push(TokenKind::Identifier(word.to_string()), word, position);
        }
    }
}
