#![allow(dead_code)]

use dotenv_syntax::{Position, Scanner, Token};

pub const FULL_FILE: &str = r#"
# This is a comment and is ignored by the parser completely
NUMBER_OF_THINGS=123 # Comments can also go on lines
USERNAME=mysuperuser

# Command substitution
API_KEY=$(op read op://MyVault/SomeService/api_key)

# Variable interpolation
EMAIL=${USER}@email.com # We added $USER above
CACHE_DIR=${HOME}/.cache # Can also reference existing system env vars
DATABASE_URL="postgres://${USER}@localhost/my_database"

# Single quotes force the string to be treated as literal
# no interpolation or command substitution will happen here
LITERAL='${USER} should show up literally'

# Multiline strings can be declared with """. Leading and trailing
# whitespace will be trimmed allowing for nicer formatting.
MANY_LINES="""
This is a lot of text with multiple lines

You could use this to store the contents of a file or
an X509 cert, an SSH key etc.
"""

# Escape sequences work as you'd expect
ESCAPE_ME="Newline\n and a tab\t etc."

# You can even use the export keyword to retain compatibility with e.g. bash
export SOMETHING=yes
"#;

/// Scan `src` to the end, failing the test on any syntax error.
pub fn scan(src: &str) -> Vec<Token> {
    let mut scanner = Scanner::new("test", src.as_bytes()).with_handler(fail);
    scanner.tokens().collect()
}

fn fail(pos: &Position, msg: &str) {
    panic!("{pos}: {msg}");
}

/// Scan `src` to the end, collecting every reported error.
pub fn scan_with_errors(name: &str, src: &str) -> (Vec<Token>, Vec<(Position, String)>) {
    let mut errors = Vec::new();
    let mut scanner = Scanner::new(name, src.as_bytes())
        .with_handler(|pos: &Position, msg: &str| errors.push((pos.clone(), msg.to_string())));
    let tokens = scanner.tokens().collect();
    drop(scanner);
    (tokens, errors)
}
