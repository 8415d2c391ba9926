//! Scanner for `.env` files.
//!
//! Turns the raw bytes of a `.env` file into a stream of typed tokens
//! carrying byte offsets, ready for a parser to assemble into key/value
//! pairs. Errors come back as an `Error` token plus an optional callback
//! with an editor-clickable [`Position`].
//!
//! # Quick start
//!
//! ## Stream tokens
//!
//! ```
//! use dotenv_syntax::{Kind, Scanner};
//!
//! let src = b"# config\nNAME=${USER}\n";
//! let mut scanner = Scanner::new("stdin", src);
//!
//! let kinds: Vec<_> = scanner.tokens().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         Kind::Comment,
//!         Kind::Ident,
//!         Kind::Eq,
//!         Kind::Dollar,
//!         Kind::OpenBrace,
//!         Kind::Ident,
//!         Kind::CloseBrace,
//!         Kind::Eof,
//!     ]
//! );
//! ```
//!
//! ## Slice the lexemes back out
//!
//! ```
//! use dotenv_syntax::tokenize;
//!
//! let src = b"GREETING='hello $USER'";
//! let tokens = tokenize("stdin", src).unwrap();
//! assert_eq!(tokens[2].text(src), b"hello $USER");
//! ```
//!
//! ## Report errors on the terminal
//!
//! ```no_run
//! use dotenv_syntax::{PrettyConsoleHandler, Scanner};
//!
//! let src = std::fs::read(".env").unwrap();
//! let mut scanner =
//!     Scanner::new(".env", &src).with_handler(PrettyConsoleHandler::new(std::io::stderr()));
//! for tok in scanner.tokens() {
//!     println!("{tok}");
//! }
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod diagnostics;
pub mod error;
pub mod position;
pub mod scanner;
pub mod token;

pub use diagnostics::PrettyConsoleHandler;
pub use error::{ErrorHandler, LexErrorKind, SyntaxError};
pub use position::Position;
pub use scanner::{Scanner, Tokens, tokenize};
pub use token::{Kind, Token};
