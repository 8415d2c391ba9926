use crate::position::Position;

/// Classifies a lexical error. The `Display` form is the message passed to
/// an [`ErrorHandler`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// Quoted literal with no closing quote at all.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// `"""` literal where a `"` was found but never a closing `"""`.
    #[error("unterminated multiline string")]
    UnterminatedMultilineString,
    /// Character that cannot start any token.
    #[error("unrecognised character: {0:?}")]
    UnrecognisedCharacter(char),
}

/// A syntax error with its resolved source position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{position}: {message}")]
pub struct SyntaxError {
    pub position: Position,
    pub message: String,
}

/// Receives syntax errors as they are found.
///
/// Called synchronously, exactly once per lexical error, on the scanning
/// thread. Implementations must not re-enter the scanner.
///
/// Any `FnMut(&Position, &str)` closure is a handler:
///
/// ```
/// use dotenv_syntax::{Kind, Position, Scanner};
///
/// let mut errors = Vec::new();
/// let mut scanner = Scanner::new("stdin", b"KEY='oops")
///     .with_handler(|pos: &Position, msg: &str| errors.push(format!("{pos}: {msg}")));
/// let last = scanner.tokens().last().unwrap();
/// assert_eq!(last.kind, Kind::Error);
/// drop(scanner);
/// assert_eq!(errors, ["stdin:1:5-10: unterminated string literal"]);
/// ```
pub trait ErrorHandler {
    fn handle(&mut self, position: &Position, message: &str);
}

impl<F> ErrorHandler for F
where
    F: FnMut(&Position, &str),
{
    fn handle(&mut self, position: &Position, message: &str) {
        self(position, message);
    }
}
