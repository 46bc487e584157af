//! Error kinds produced while transpiling a template.
//!
//! Mirrors the shape of a coarse, hand-rolled error enum rather than pulling
//! in a derive-macro error crate: each variant owns exactly the data needed
//! to reproduce its contractual message text, and `Display` is the single
//! place that text is assembled.

use std::fmt;

/// Every way a transpile can fail.
///
/// Message text produced by `Display` is contractual: the public `compile`
/// family renders this to a plain `String` at the API boundary, and callers
/// (including this crate's own tests) match against exact substrings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// The source template already contains `<% ... %>`-shaped text.
    InjectedExpression,
    /// A tag was opened but the closing delimiter was never found.
    UnclosedTag,
    /// A forbidden character (always `{`) appeared inside an open tag.
    ForbiddenChar { found: char, accumulated: String },
    /// A `}}` appeared outside of any open tag.
    StrayCloser { preview: String },
    /// A `{{/...}}` appeared with no block open.
    UnexpectedClose,
    /// A `{{/...}}` closed the wrong block.
    WrongClose { expected: String },
    /// End of input reached with block(s) still open.
    MissingClose { top: String },
    /// A block-helper name has no registered callback.
    HelperNotRegistered { name: String },
    /// A partial name has no registered callback.
    PartialNotRegistered { name: String },
    /// A tag (of the given kind) was missing its required name.
    NameRequired { kind: &'static str },
    /// An unescaped tag (`{{{name}}}`) carried options, which is forbidden.
    OptionsNotAllowed,
    /// A dialect helper rejected its own arguments.
    DialectSpecific(String),
    /// A helper callback returned something other than `Ok`/`Err`/a string.
    InvalidCallbackResult(String),
    /// A tag's option string opened a `"` that was never closed.
    UnterminatedQuote { accumulated: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::InjectedExpression => {
                write!(
                    f,
                    "Compilation unsafe: the source template contains EEx expressions."
                )
            }
            CompileError::UnclosedTag => write!(f, "Unclosed tag."),
            CompileError::ForbiddenChar { found, accumulated } => write!(
                f,
                "Unexpected character {found} inside a tag: {accumulated}"
            ),
            CompileError::StrayCloser { preview } => {
                write!(f, "Unexpected closing delimiter: }}}}{preview}")
            }
            CompileError::UnexpectedClose => write!(f, "Unexpected closing block tag."),
            CompileError::WrongClose { expected } => write!(
                f,
                "Unexpected closing block tag. Expected closing {{{{/{expected}}}}} tag."
            ),
            CompileError::MissingClose { top } => write!(
                f,
                "Unexpected end of template.  Closing block not found: {{{{/{top}}}}}"
            ),
            CompileError::HelperNotRegistered { name } => {
                write!(f, "Block-helper not registered: {name}")
            }
            CompileError::PartialNotRegistered { name } => {
                write!(f, "Partial not registered: {name}")
            }
            CompileError::NameRequired { kind } => {
                write!(f, "{kind} tags require a name, e.g. {{{{...}}}}")
            }
            CompileError::OptionsNotAllowed => {
                write!(f, "Non-escaped tags should not include options")
            }
            CompileError::DialectSpecific(message) => write!(f, "{message}"),
            CompileError::InvalidCallbackResult(message) => write!(f, "{message}"),
            CompileError::UnterminatedQuote { accumulated } => write!(
                f,
                "Unterminated quoted string in tag options: {accumulated}"
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Truncates `s` to at most `max_chars` characters at a char boundary, used
/// for the stray-closer error preview (see §7: "first 32 characters").
pub(crate) fn preview(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
