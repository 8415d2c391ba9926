use std::fmt;

/// Token kinds produced by the scanner.
///
/// Ordered by declaration, which only exists so tests can range-check kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// End of input. Always zero width.
    Eof,
    /// Lexical error. The stream ends here.
    Error,
    /// Line comment, `#` included.
    Comment,
    /// `=`
    Eq,
    /// Single-quoted literal, quotes excluded.
    RawString,
    /// Double-quoted (or `"""` multiline) literal, quotes excluded, or a bare value.
    String,
    /// Variable name, or a bare value made purely of identifier characters.
    Ident,
    /// `$`
    Dollar,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
}

impl Kind {
    /// Reports whether a token of this kind ends the token stream.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Eof | Self::Error)
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Error => "Error",
            Self::Comment => "Comment",
            Self::Eq => "Eq",
            Self::RawString => "RawString",
            Self::String => "String",
            Self::Ident => "Ident",
            Self::Dollar => "Dollar",
            Self::OpenBrace => "OpenBrace",
            Self::CloseBrace => "CloseBrace",
            Self::OpenParen => "OpenParen",
            Self::CloseParen => "CloseParen",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token is a kind plus the half-open byte range `[start, end)` it covers
/// in the scanned buffer. It owns no text; slice the buffer with
/// [`Token::text`] to get the lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: Kind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    #[must_use]
    pub const fn new(kind: Kind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Reports whether the token is any of the given kinds.
    ///
    /// ```
    /// use dotenv_syntax::{Kind, Token};
    ///
    /// let tok = Token::new(Kind::Eof, 3, 3);
    /// assert!(tok.is(&[Kind::Eof, Kind::Error]));
    /// assert!(!tok.is(&[Kind::Ident]));
    /// ```
    #[must_use]
    pub fn is(&self, kinds: &[Kind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Slices the lexeme out of the buffer this token was scanned from.
    ///
    /// Returns an empty slice if the range does not fit `src`, which only
    /// happens when the token came from a different buffer.
    #[must_use]
    pub fn text<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        src.get(self.start..self.end).unwrap_or_default()
    }

    /// Width of the range in bytes. Zero for a backwards range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Token::{} start={}, end={}>",
            self.kind, self.start, self.end
        )
    }
}
