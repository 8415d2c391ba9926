use std::fmt;

/// A source location, optionally spanning a range of columns on one line.
///
/// Positions without a name are invalid. Input read from standard input
/// uses the name `"stdin"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// File name (or `"stdin"`).
    pub name: String,
    /// Byte offset from the start of the buffer.
    pub offset: usize,
    /// Line number, 1 indexed.
    pub line: usize,
    /// Start column, 1 indexed.
    pub start_col: usize,
    /// End column, 1 indexed. Equal to `start_col` for a single character.
    pub end_col: usize,
}

impl Position {
    /// Reports whether the position describes a real source location.
    ///
    /// `name`, `line` and `start_col` must be set, and `end_col` must be
    /// non zero and not before `start_col`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && self.line >= 1
            && self.start_col >= 1
            && self.end_col >= 1
            && self.end_col >= self.start_col
    }
}

/// Renders `name:line:col` or `name:line:start-end`, a form most editors
/// and terminals can jump to.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(
                f,
                "BadPosition: {{name: {:?}, line: {}, start_col: {}, end_col: {}}}",
                self.name, self.line, self.start_col, self.end_col
            );
        }

        if self.start_col == self.end_col {
            write!(f, "{}:{}:{}", self.name, self.line, self.start_col)
        } else {
            write!(
                f,
                "{}:{}:{}-{}",
                self.name, self.line, self.start_col, self.end_col
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(name: &str, line: usize, start_col: usize, end_col: usize) -> Position {
        Position {
            name: name.to_string(),
            offset: 0,
            line,
            start_col,
            end_col,
        }
    }

    #[test]
    fn single_column() {
        assert_eq!(pos(".env", 4, 7, 7).to_string(), ".env:4:7");
    }

    #[test]
    fn column_range() {
        assert_eq!(pos("stdin", 1, 2, 9).to_string(), "stdin:1:2-9");
    }

    #[test]
    fn invalid_positions() {
        assert!(!pos("", 1, 1, 1).is_valid());
        assert!(!pos("a", 0, 1, 1).is_valid());
        assert!(!pos("a", 1, 0, 1).is_valid());
        assert!(!pos("a", 1, 1, 0).is_valid());
        assert!(!pos("a", 1, 5, 4).is_valid());
        assert!(!Position::default().is_valid());
    }

    #[test]
    fn bad_position_placeholder() {
        assert_eq!(
            pos("", 0, 3, 1).to_string(),
            r#"BadPosition: {name: "", line: 0, start_col: 3, end_col: 1}"#
        );
    }
}
