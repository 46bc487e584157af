//! Immutable record types describing a single parsed tag.

use indexmap::IndexMap;

/// One positional or keyword argument parsed out of a tag's option string.
///
/// `quoted` distinguishes a double-quoted string literal (`"Customer"`) from
/// a bare identifier path (`user.profile.firstName`); dialect helpers need
/// this to decide whether to re-emit the value as a literal or run it
/// through the variable translation contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgModel {
    pub value: String,
    pub quoted: bool,
}

impl ArgModel {
    pub fn unquoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }
}

/// A fully parsed tag, produced by the tag lexer and consumed by the parser
/// and by helper callbacks.
///
/// Every field besides `block_contents` is fixed at construction time;
/// `block_contents` is the one field the parser fills in after the fact,
/// once a block tag's body has been recursively transpiled (see the parser's
/// block-open branch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagModel {
    pub name: String,
    pub raw_contents: String,
    pub raw_options: String,
    pub args: Vec<ArgModel>,
    pub kwargs: IndexMap<String, ArgModel>,
    pub opening_delimiter: &'static str,
    pub closing_delimiter: &'static str,
    pub block_contents: String,
}

impl TagModel {
    /// Builds a name-only tag (no options were present after the name).
    pub fn name_only(
        name: impl Into<String>,
        raw_contents: impl Into<String>,
        opening_delimiter: &'static str,
        closing_delimiter: &'static str,
    ) -> Self {
        Self {
            name: name.into(),
            raw_contents: raw_contents.into(),
            raw_options: String::new(),
            args: Vec::new(),
            kwargs: IndexMap::new(),
            opening_delimiter,
            closing_delimiter,
            block_contents: String::new(),
        }
    }

    pub fn with_options(
        name: impl Into<String>,
        raw_contents: impl Into<String>,
        raw_options: impl Into<String>,
        args: Vec<ArgModel>,
        kwargs: IndexMap<String, ArgModel>,
        opening_delimiter: &'static str,
        closing_delimiter: &'static str,
    ) -> Self {
        Self {
            name: name.into(),
            raw_contents: raw_contents.into(),
            raw_options: raw_options.into(),
            args,
            kwargs,
            opening_delimiter,
            closing_delimiter,
            block_contents: String::new(),
        }
    }

    pub fn is_name_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// First positional argument, if any.
    pub fn first_arg(&self) -> Option<&ArgModel> {
        self.args.first()
    }
}
