//! The `.env` scanner.
//!
//! Turns a byte buffer into [`Token`]s one at a time. Variable expansion
//! (`$NAME`, `${NAME}`) and command substitution (`$(cmd)`) are emitted as
//! bare punctuation plus identifiers; putting them back together is the
//! parser's job. Quoted strings come out whole, with `$` and friends left
//! inside them untouched.

use std::iter::FusedIterator;

use crate::error::{ErrorHandler, LexErrorKind, SyntaxError};
use crate::position::Position;
use crate::token::{Kind, Token};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Scan a whole buffer, returning every token before `EOF`.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] found. Scanning stops there.
///
/// ```
/// use dotenv_syntax::{Kind, tokenize};
///
/// let tokens = tokenize("stdin", b"export NAME=1").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [Kind::Ident, Kind::Eq, Kind::Ident]);
/// ```
pub fn tokenize(name: &str, src: &[u8]) -> Result<Vec<Token>, SyntaxError> {
    let mut error = None;
    let mut tokens = Vec::new();

    let mut scanner = Scanner::new(name, src).with_handler(|pos: &Position, msg: &str| {
        error = Some(SyntaxError {
            position: pos.clone(),
            message: msg.to_string(),
        });
    });

    for tok in scanner.tokens() {
        if tok.kind != Kind::Eof {
            tokens.push(tok);
        }
    }
    drop(scanner);

    error.map_or(Ok(tokens), Err)
}

/// The `.env` scanner.
///
/// Not meant to be shared: one scanner, one caller. Independent scanners
/// over the same buffer are fine.
pub struct Scanner<'src> {
    handler: Option<Box<dyn ErrorHandler + 'src>>,
    name: String,
    src: &'src [u8],
    /// Start of the current token.
    start: usize,
    /// Line the current token started on.
    start_line: usize,
    /// Offset at which `start_line` began.
    start_line_offset: usize,
    /// Cursor, in bytes.
    pos: usize,
    /// Current line, 1 indexed.
    line: usize,
    /// Offset at which the current line began.
    line_offset: usize,
    /// The `Error` token, once one has been emitted.
    failed: Option<Token>,
}

impl<'src> Scanner<'src> {
    /// Create a scanner over `src`. `name` is only used in error positions.
    ///
    /// A leading UTF-8 byte order mark is skipped.
    #[must_use]
    pub fn new(name: impl Into<String>, src: &'src [u8]) -> Self {
        let start = if src.starts_with(BOM) { BOM.len() } else { 0 };
        Self {
            handler: None,
            name: name.into(),
            src,
            start,
            start_line: 1,
            start_line_offset: 0,
            pos: start,
            line: 1,
            line_offset: 0,
            failed: None,
        }
    }

    /// Install the handler called on each syntax error.
    #[must_use]
    pub fn with_handler(mut self, handler: impl ErrorHandler + 'src) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Scan and return the next token.
    ///
    /// Once the buffer is exhausted every call returns a zero-width `EOF`.
    /// After an error every call returns that same `Error` token again,
    /// without reporting it a second time.
    pub fn scan(&mut self) -> Token {
        if let Some(tok) = self.failed {
            return tok;
        }

        self.skip_whitespace();
        while self.skip_export() {}

        let Some(ch) = self.advance() else {
            return self.token(Kind::Eof);
        };

        match ch {
            '#' => self.scan_comment(),
            '=' => self.token(Kind::Eq),
            '\'' => self.scan_raw_string(),
            '"' => self.scan_string(),
            '$' => self.token(Kind::Dollar),
            '{' => self.token(Kind::OpenBrace),
            '}' => self.token(Kind::CloseBrace),
            '(' => self.token(Kind::OpenParen),
            ')' => self.token(Kind::CloseParen),
            c if is_ident(c) => self.scan_ident(),
            c if is_value(c) => self.scan_value(),
            c => self.error(&LexErrorKind::UnrecognisedCharacter(c)),
        }
    }

    /// A lazy iterator over the remaining tokens.
    ///
    /// Yields the terminating `EOF` or `Error` token and then stops.
    /// Dropping it early leaves the scanner where it was.
    pub const fn tokens(&mut self) -> Tokens<'_, 'src> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Decode the next character and advance past it, tracking newlines.
    fn advance(&mut self) -> Option<char> {
        let (ch, width) = decode(self.rest())?;
        self.pos += width;

        if ch == '\n' {
            self.line += 1;
            self.line_offset = self.pos;
        }

        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        decode(self.rest()).map(|(ch, _)| ch)
    }

    fn rest(&self) -> &'src [u8] {
        self.src.get(self.pos..).unwrap_or_default()
    }

    /// Forget everything scanned since the last token.
    const fn discard(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_line_offset = self.line_offset;
    }

    /// Consume `chars` if and only if the input continues with exactly them.
    fn take(&mut self, chars: &str) -> bool {
        if !self.rest().starts_with(chars.as_bytes()) {
            return false;
        }

        for _ in chars.chars() {
            self.advance();
        }

        true
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
        self.discard();
    }

    /// Drop an `export` keyword and the whitespace after it.
    fn skip_export(&mut self) -> bool {
        const EXPORT: &[u8] = b"export";

        let rest = self.rest();
        if !rest.starts_with(EXPORT) {
            return false;
        }

        let followed_by_space =
            decode(&rest[EXPORT.len()..]).is_some_and(|(ch, _)| ch.is_whitespace());
        if !followed_by_space {
            return false;
        }

        self.take("export");
        self.skip_whitespace();
        true
    }

    /// Consume up to (not including) the next unescaped `quote`.
    ///
    /// Returns false if the input ran out first.
    fn take_until_quote(&mut self, quote: char) -> bool {
        loop {
            match self.peek() {
                None => return false,
                Some(ch) if ch == quote => return true,
                Some('\\') if quote == '"' => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    const fn token(&mut self, kind: Kind) -> Token {
        let tok = Token::new(kind, self.start, self.pos);
        self.discard();
        tok
    }

    /// Emit a token for `[start, end)` and reset past whatever follows it.
    const fn token_at(&mut self, kind: Kind, start: usize, end: usize) -> Token {
        self.discard();
        Token::new(kind, start, end)
    }

    /// Report `kind` to the handler (if any) and return an `Error` token
    /// covering everything scanned for the current token so far.
    fn error(&mut self, kind: &LexErrorKind) -> Token {
        let position = self.error_position();
        let tok = self.token(Kind::Error);
        self.failed = Some(tok);

        log::debug!("syntax error at {position}: {kind}");

        if let Some(handler) = self.handler.as_mut() {
            handler.handle(&position, &kind.to_string());
        }

        tok
    }

    /// Columns are byte distances from the start of the line, plus one.
    ///
    /// A token that ran across lines is reported on the line it started on,
    /// up to the end of that line.
    fn error_position(&self) -> Position {
        let start_col = 1 + self.start - self.start_line_offset;

        let end_col = if self.line == self.start_line {
            1 + self.pos - self.line_offset
        } else {
            let line_end = self.src[self.start..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(self.pos, |n| self.start + n);
            1 + line_end - self.start_line_offset
        };

        Position {
            name: self.name.clone(),
            offset: self.start,
            line: self.start_line,
            start_col,
            end_col: end_col.max(start_col),
        }
    }

    /// `#` up to the end of the line. The newline is left alone.
    fn scan_comment(&mut self) -> Token {
        self.take_while(|c| c != '\n');
        self.token(Kind::Comment)
    }

    /// `'...'`, taken literally. The token excludes the quotes.
    fn scan_raw_string(&mut self) -> Token {
        let start = self.pos;

        if !self.take_until_quote('\'') {
            return self.error(&LexErrorKind::UnterminatedString);
        }

        let end = self.pos;
        self.advance();
        self.token_at(Kind::RawString, start, end)
    }

    /// `"..."` or `"""..."""`. Escapes and `$` are left for the consumer.
    fn scan_string(&mut self) -> Token {
        if self.take(r#""""#) {
            return self.scan_multiline_string();
        }

        let start = self.pos;

        if !self.take_until_quote('"') {
            return self.error(&LexErrorKind::UnterminatedString);
        }

        let end = self.pos;
        self.advance();
        self.token_at(Kind::String, start, end)
    }

    /// The body of a `"""` string. The opening quotes are already consumed.
    ///
    /// A lone `"` inside the body does not close it; only `"""` does.
    fn scan_multiline_string(&mut self) -> Token {
        let start = self.pos;
        let mut saw_quote = false;

        loop {
            if !self.take_until_quote('"') {
                let kind = if saw_quote {
                    LexErrorKind::UnterminatedMultilineString
                } else {
                    LexErrorKind::UnterminatedString
                };
                return self.error(&kind);
            }

            let end = self.pos;
            if self.take(r#"""""#) {
                return self.token_at(Kind::String, start, end);
            }

            saw_quote = true;
            self.advance();
        }
    }

    /// An identifier. If it runs straight into other value characters
    /// (`example.com`, `me@host`) the whole run is a bare value instead.
    fn scan_ident(&mut self) -> Token {
        self.take_while(is_ident);

        if self.peek().is_some_and(|c| c != '=' && is_value(c)) {
            return self.scan_value();
        }

        self.token(Kind::Ident)
    }

    /// An unquoted value, emitted as a `String`.
    fn scan_value(&mut self) -> Token {
        self.take_while(is_value);
        self.token(Kind::String)
    }
}

/// Lazy token iterator returned by [`Scanner::tokens`].
pub struct Tokens<'s, 'src> {
    scanner: &'s mut Scanner<'src>,
    done: bool,
}

impl Iterator for Tokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let tok = self.scanner.scan();
        self.done = tok.kind.is_terminal();
        Some(tok)
    }
}

impl FusedIterator for Tokens<'_, '_> {}

/// The first character of `bytes` and its width.
///
/// Invalid UTF-8 decodes as U+FFFD, one byte at a time.
fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let first = *bytes.first()?;
    if first.is_ascii() {
        return Some((char::from(first), 1));
    }

    let chunk = bytes.utf8_chunks().next()?;
    match chunk.valid().chars().next() {
        Some(ch) => Some((ch, ch.len_utf8())),
        None => Some((char::REPLACEMENT_CHARACTER, 1)),
    }
}

/// ASCII letters, digits, `_` and `-`.
const fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Anything visible except the punctuation that starts its own token.
fn is_value(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !matches!(c, '$' | '{' | '}' | '(' | ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Kind> {
        Scanner::new("test", src.as_bytes())
            .tokens()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn eq() {
        let mut scanner = Scanner::new("test", b"=");
        let got: Vec<_> = scanner.tokens().collect();
        assert_eq!(
            got,
            [Token::new(Kind::Eq, 0, 1), Token::new(Kind::Eof, 1, 1)]
        );
    }

    #[test]
    fn eof_repeats() {
        let mut scanner = Scanner::new("test", b"A");
        assert_eq!(scanner.scan().kind, Kind::Ident);
        assert_eq!(scanner.scan(), Token::new(Kind::Eof, 1, 1));
        assert_eq!(scanner.scan(), Token::new(Kind::Eof, 1, 1));
    }

    #[test]
    fn error_repeats() {
        let mut calls = 0;
        let mut scanner = Scanner::new("stdin", b"A=\0 B=1 C='x")
            .with_handler(|_: &Position, _: &str| calls += 1);

        assert_eq!(scanner.scan().kind, Kind::Ident);
        assert_eq!(scanner.scan().kind, Kind::Eq);
        let err = scanner.scan();
        assert_eq!(err, Token::new(Kind::Error, 2, 3));
        for _ in 0..6 {
            assert_eq!(scanner.scan(), err);
        }
        drop(scanner);

        assert_eq!(calls, 1);
    }

    #[test]
    fn tracks_lines() {
        let mut scanner = Scanner::new("test", b"A=1\nB=2\n\nC");
        while scanner.scan().kind != Kind::Eof {}
        assert_eq!(scanner.line, 4);
        assert_eq!(scanner.line_offset, 9);
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            kinds("${}()"),
            [
                Kind::Dollar,
                Kind::OpenBrace,
                Kind::CloseBrace,
                Kind::OpenParen,
                Kind::CloseParen,
                Kind::Eof
            ]
        );
    }

    #[test]
    fn ident_upgrades_to_value() {
        let src = b"example.com";
        let mut scanner = Scanner::new("test", src);
        assert_eq!(scanner.scan(), Token::new(Kind::String, 0, 11));
    }

    #[test]
    fn ident_stops_at_eq() {
        assert_eq!(
            kinds("a=b"),
            [Kind::Ident, Kind::Eq, Kind::Ident, Kind::Eof]
        );
    }

    #[test]
    fn bom_is_skipped() {
        let src = b"\xEF\xBB\xBFKEY=1";
        let mut scanner = Scanner::new("test", src);
        assert_eq!(scanner.scan(), Token::new(Kind::Ident, 3, 6));
    }

    #[test]
    fn invalid_utf8_is_a_value() {
        let src = b"K=\xFF\xFE";
        let mut scanner = Scanner::new("test", src);
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.scan(), Token::new(Kind::String, 2, 4));
    }

    #[test]
    fn multibyte_value() {
        let src = "K=caf\u{e9}".as_bytes();
        let mut scanner = Scanner::new("test", src);
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.scan(), Token::new(Kind::String, 2, 7));
    }

    #[test]
    fn tokenize_collects_until_eof() {
        let tokens = tokenize("test", b"A=1 # one").expect("tokenize");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [Kind::Ident, Kind::Eq, Kind::Ident, Kind::Comment]);
    }

    #[test]
    fn tokenize_reports_error() {
        let err = tokenize(".env", b"A=1\nB=\"open").unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.position.line, 2);
        assert_eq!(err.position.start_col, 3);
        assert_eq!(err.position.end_col, 8);
        assert_eq!(err.position.offset, 6);
    }
}
