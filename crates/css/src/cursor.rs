//! Character cursor
//!
//! Position-tracked, backtrackable reader over the stylesheet source. Every
//! parser in the crate shares one cursor.

use crate::comment::Comment;
use crate::error::{CssError, CssResult, SourceLocation};
use crate::position::Position;
use crate::settings::Settings;

/// How [`Cursor::consume_until`] treats the stop character it finds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAt {
    /// Leave the stop character in the input
    Before,
    /// Consume the stop character and drop it
    Consume,
    /// Consume the stop character and append it to the result
    Include,
}

/// A saved cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    offset: usize,
    line: usize,
    column: usize,
}

impl Anchor {
    /// Rewind `cursor` to this anchor
    pub fn backtrack(self, cursor: &mut Cursor) {
        cursor.position = self.offset;
        cursor.line = self.line;
        cursor.column = self.column;
    }
}

/// Character cursor over CSS source text
pub struct Cursor {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    settings: Settings,
    charset: String,
}

impl Cursor {
    /// Create a new cursor starting at `line_number`
    pub fn new(input: &str, settings: Settings, line_number: usize) -> Self {
        let charset = settings.default_charset.clone();
        Self {
            chars: input.chars().collect(),
            position: 0,
            line: line_number,
            column: 0,
            settings,
            charset,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_lenient(&self) -> bool {
        self.settings.lenient_parsing
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.charset = charset.into();
        log::debug!("Parser charset set to {}", self.charset);
    }

    pub fn current_line(&self) -> usize {
        self.line
    }

    pub fn current_column(&self) -> usize {
        self.column
    }

    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Get the current source location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.position)
    }

    pub fn anchor(&self) -> Anchor {
        Anchor {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Move the cursor to the end of input
    pub fn jump_to_end(&mut self) {
        while self.advance().is_some() {}
    }

    /// Peek at the next character without consuming
    pub fn peek_char(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Peek at the character `offset` places away from the cursor
    pub fn peek_char_at(&self, offset: isize) -> Option<char> {
        let index = self.position.checked_add_signed(offset)?;
        self.chars.get(index).copied()
    }

    /// Peek at up to `length` characters starting `offset` places away
    pub fn peek(&self, length: usize, offset: isize) -> String {
        let Some(start) = self.position.checked_add_signed(offset) else {
            return String::new();
        };
        if start >= self.chars.len() {
            return String::new();
        }
        let end = (start + length).min(self.chars.len());
        self.chars[start..end].iter().collect()
    }

    /// Whether the input continues with `literal`
    pub fn comes(&self, literal: &str, ignore_case: bool) -> bool {
        if literal.is_empty() {
            return false;
        }
        let mut index = self.position;
        for expected in literal.chars() {
            let Some(&actual) = self.chars.get(index) else {
                return false;
            };
            let same = if ignore_case {
                actual.to_lowercase().eq(expected.to_lowercase())
            } else {
                actual == expected
            };
            if !same {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Consume the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else if self.settings.multibyte_support {
            self.column += 1;
        } else {
            self.column += c.len_utf8();
        }
        Some(c)
    }

    fn consume_char(&mut self) -> CssResult<char> {
        let location = self.location();
        self.advance()
            .ok_or_else(|| CssError::unexpected_eof("1 character", location))
    }

    /// Consume exactly `count` characters
    pub fn consume(&mut self, count: usize) -> CssResult<String> {
        if self.position + count > self.chars.len() {
            return Err(CssError::unexpected_eof(
                format!("{} characters", count),
                self.location(),
            ));
        }
        let mut result = String::with_capacity(count);
        for _ in 0..count {
            if let Some(c) = self.advance() {
                result.push(c);
            }
        }
        Ok(result)
    }

    /// Consume `literal` or fail without moving
    pub fn consume_literal(&mut self, literal: &str) -> CssResult<String> {
        if !self.comes(literal, false) {
            let found = self.peek(literal.chars().count().max(5), 0);
            return Err(CssError::unexpected_token(
                format!("`{}`", literal),
                found,
                self.location(),
            ));
        }
        self.consume(literal.chars().count())
    }

    /// Consume characters until one of `stops` is found.
    ///
    /// Comments encountered on the way are removed from the result and pushed
    /// to `comments`. Running out of input is an error unless `or_eof` is set,
    /// in which case the cursor is restored to where it started.
    pub fn consume_until(
        &mut self,
        stops: &[char],
        stop_at: StopAt,
        or_eof: bool,
        comments: &mut Vec<Comment>,
    ) -> CssResult<String> {
        let start = self.anchor();
        let mut out = String::new();

        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                match stop_at {
                    StopAt::Before => {}
                    StopAt::Consume => {
                        self.advance();
                    }
                    StopAt::Include => {
                        self.advance();
                        out.push(c);
                    }
                }
                return Ok(out);
            }
            self.advance();
            out.push(c);
            if let Some(comment) = self.consume_comment()? {
                comments.push(comment);
            }
        }

        if or_eof {
            return Ok(out);
        }

        let expected = format!(
            "one of {}",
            stops.iter().map(|c| format!("`{}`", c)).collect::<Vec<_>>().join(", ")
        );
        start.backtrack(self);
        Err(CssError::unexpected_eof(expected, self.location()))
    }

    /// Skip whitespace and comments, returning the comments
    pub fn consume_whitespace(&mut self) -> CssResult<Vec<Comment>> {
        let mut comments = Vec::new();
        loop {
            while self.peek_char().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let comment = match self.consume_comment() {
                Ok(comment) => comment,
                Err(e) if e.is_eof() && self.is_lenient() => {
                    log::warn!("Unterminated comment running to end of input");
                    self.jump_to_end();
                    return Ok(comments);
                }
                Err(e) => return Err(e),
            };

            match comment {
                Some(comment) => comments.push(comment),
                None => break,
            }
        }
        Ok(comments)
    }

    /// Consume a comment if one starts here
    pub fn consume_comment(&mut self) -> CssResult<Option<Comment>> {
        if !self.comes("/*", false) {
            return Ok(None);
        }

        let position = self.current_position();
        self.advance(); // consume '/'
        let mut text = String::new();
        loop {
            text.push(self.consume_char()?);
            if self.comes("*/", false) {
                self.advance();
                self.advance();
                break;
            }
        }

        // The opening '*' was collected with the body
        let body = text.strip_prefix('*').unwrap_or(&text);
        Ok(Some(Comment::new(body).with_position(position)))
    }

    /// Parse one character, resolving escapes.
    ///
    /// Returns `None` when the next character cannot continue an identifier.
    /// An escaped newline yields an empty string.
    pub fn parse_character(&mut self, for_identifier: bool) -> CssResult<Option<String>> {
        if self.peek_char() == Some('\\') {
            if for_identifier
                && self.is_lenient()
                && (self.comes("\\0", false) || self.comes("\\9", false))
            {
                // IE hack, handled by the declaration parser
                return Ok(None);
            }
            self.consume_literal("\\")?;
            if self.comes("\n", false) || self.comes("\r", false) {
                return Ok(Some(String::new()));
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                return self.consume(1).map(Some);
            }

            let mut hex = String::new();
            while hex.len() < 6 {
                match self.peek_char() {
                    Some(c) if c.is_ascii_hexdigit() => {
                        hex.push(c);
                        self.advance();
                    }
                    _ => break,
                }
            }
            if hex.len() < 6 && self.peek_char().is_some_and(char::is_whitespace) {
                if self.comes("\r\n", false) {
                    self.consume(2)?;
                } else {
                    self.consume(1)?;
                }
            }
            let decoded = u32::from_str_radix(&hex, 16)
                .ok()
                .and_then(char::from_u32)
                .filter(|c| *c != '\0')
                .unwrap_or('\u{FFFD}');
            return Ok(Some(decoded.to_string()));
        }

        if for_identifier {
            match self.peek_char() {
                Some(c) if is_ident_char(c) => {
                    self.advance();
                    Ok(Some(c.to_string()))
                }
                _ => Ok(None),
            }
        } else {
            self.consume_char().map(|c| Some(c.to_string()))
        }
    }

    /// Parse an identifier; escaped characters that need it stay escaped
    pub fn parse_identifier(&mut self, ignore_case: bool) -> CssResult<String> {
        if self.is_end() {
            return Err(CssError::unexpected_eof("identifier", self.location()));
        }
        let location = self.location();
        let Some(first) = self.parse_character(true)? else {
            return Err(CssError::unexpected_token("identifier", self.peek(5, 0), location));
        };

        let mut result = String::new();
        push_identifier_part(&mut result, &first);
        while !self.is_end() {
            match self.parse_character(true)? {
                Some(part) => push_identifier_part(&mut result, &part),
                None => break,
            }
        }

        if ignore_case {
            result = result.to_lowercase();
        }
        Ok(result)
    }
}

fn push_identifier_part(result: &mut String, part: &str) {
    for c in part.chars() {
        if is_ident_char(c) {
            result.push(c);
        } else {
            result.push('\\');
            result.push(c);
        }
    }
}

/// Check if character can be part of an identifier
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c as u32 > 0xa1
}
