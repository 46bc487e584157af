//! Accumulates the characters of a single tag, from just after its opening
//! delimiter up to (and consuming) its closing delimiter.

use memchr::memmem;
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::{self, CompileError};
use crate::option_lexer;
use crate::prefix_matcher::HelperPrefixMatcher;
use crate::tag_model::TagModel;

/// How many characters of the output accumulated so far to show in a
/// stray-closer error message (see §7: "up to 32 chars").
const STRAY_CLOSER_PREVIEW_CHARS: usize = 32;

/// Scans `input` for `closing_delimiter`, failing on any `forbidden_chars`
/// byte encountered first. On success, returns the parsed tag and the
/// residual input following the closing delimiter, as a slice of `input` —
/// no copy of the remaining text is made.
pub fn accumulate_tag<'a>(
    input: &'a str,
    opening_delimiter: &'static str,
    closing_delimiter: &'static str,
    forbidden_chars: &[char],
    prefix_matcher: Option<&HelperPrefixMatcher>,
) -> Result<(TagModel, &'a str), CompileError> {
    let closer_at = memmem::find(input.as_bytes(), closing_delimiter.as_bytes());
    let forbidden_at = if forbidden_chars.is_empty() {
        None
    } else {
        input.find(|c: char| forbidden_chars.contains(&c))
    };

    let acc_end = match (forbidden_at, closer_at) {
        (Some(f), Some(d)) if f < d => {
            return Err(forbidden_char_error(input, f));
        }
        (Some(f), None) => {
            return Err(forbidden_char_error(input, f));
        }
        (_, Some(d)) => d,
        (None, None) => return Err(CompileError::UnclosedTag),
    };

    let accumulated = &input[..acc_end];
    let residual = &input[acc_end + closing_delimiter.len()..];
    let tag = make_tag(
        accumulated,
        opening_delimiter,
        closing_delimiter,
        prefix_matcher,
    )?;
    Ok((tag, residual))
}

fn forbidden_char_error(input: &str, byte_offset: usize) -> CompileError {
    let found = input[byte_offset..]
        .chars()
        .next()
        .expect("byte_offset points at a char boundary");
    CompileError::ForbiddenChar {
        found,
        accumulated: input[..byte_offset].to_string(),
    }
}

/// Builds a `CompileError::StrayCloser` for a `}}` seen outside any open tag.
pub fn stray_closer_error(output_so_far: &str) -> CompileError {
    CompileError::StrayCloser {
        preview: error::preview(output_so_far, STRAY_CLOSER_PREVIEW_CHARS),
    }
}

/// Turns the raw accumulated text of a tag into a `TagModel`: splits off the
/// name (via the prefix matcher when available, else the first Unicode
/// space-separator code point) and lexes whatever options remain.
fn make_tag(
    accumulated: &str,
    opening_delimiter: &'static str,
    closing_delimiter: &'static str,
    prefix_matcher: Option<&HelperPrefixMatcher>,
) -> Result<TagModel, CompileError> {
    let raw_contents = accumulated;
    let trimmed = accumulated.trim();

    let (name, rest) = if let Some(split) = prefix_matcher.and_then(|m| m.split(trimmed)) {
        split
    } else if let Some(at) = first_space_separator(trimmed) {
        let (name, rest) = trimmed.split_at(at);
        (name.to_string(), rest.to_string())
    } else {
        (trimmed.to_string(), String::new())
    };

    let options = rest.trim();
    if options.is_empty() {
        Ok(TagModel::name_only(
            name,
            raw_contents,
            opening_delimiter,
            closing_delimiter,
        ))
    } else {
        let (args, kwargs) = option_lexer::parse(options)?;
        Ok(TagModel::with_options(
            name,
            raw_contents,
            options,
            args,
            kwargs,
            opening_delimiter,
            closing_delimiter,
        ))
    }
}

/// Byte offset of the first char in the Unicode `Space_Separator` (`Zs`)
/// general category, e.g. plain space or no-break space — but not tab or
/// newline, which the spec's "space-separator code point" wording excludes.
fn first_space_separator(s: &str) -> Option<usize> {
    s.char_indices()
        .find(|(_, c)| get_general_category(*c) == GeneralCategory::SpaceSeparator)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_name_only_tag() {
        let (tag, residual) = accumulate_tag("firstName}} after", "{{", "}}", &['{'], None).unwrap();
        assert_eq!(tag.name, "firstName");
        assert_eq!(tag.raw_options, "");
        assert_eq!(residual, " after");
    }

    #[test]
    fn extracts_tag_with_options() {
        let (tag, _) = accumulate_tag("if user.active}}", "{{#", "}}", &['{'], None).unwrap();
        assert_eq!(tag.name, "if");
        assert_eq!(tag.raw_options, "user.active");
    }

    #[test]
    fn forbidden_char_inside_tag_is_an_error() {
        let err = accumulate_tag("foo {{ bar}}", "{{", "}}", &['{'], None).unwrap_err();
        assert!(matches!(err, CompileError::ForbiddenChar { found: '{', .. }));
    }

    #[test]
    fn unclosed_tag_is_an_error() {
        let err = accumulate_tag("firstName", "{{", "}}", &['{'], None).unwrap_err();
        assert_eq!(err, CompileError::UnclosedTag);
    }

    #[test]
    fn comment_body_allows_forbidden_chars() {
        let (tag, _) = accumulate_tag(" foo { bar --}}", "{{!--", "--}}", &[], None).unwrap();
        assert_eq!(tag.raw_contents, " foo { bar ");
    }
}
