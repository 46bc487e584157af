//! The streaming, tag-aware parser: recognizes delimiters in priority order,
//! dispatches to the registry, and tracks nested block contexts.

use memchr::memmem;

use crate::error::CompileError;
use crate::prefix_matcher::HelperPrefixMatcher;
use crate::registry::HelperRegistry;
use crate::tag_lexer::{self, accumulate_tag};

/// What a single recursive `parse_frame` call produces: the rendered text for
/// the span it was responsible for, and whatever source text remained after
/// the tag that caused it to stop (empty at true end-of-input). `tail`
/// borrows from whatever `input` the frame was given, never copied.
struct Frame<'a> {
    output: String,
    tail: &'a str,
}

/// Transpiles `template` against `registry`, returning the ETL output.
///
/// Callers are expected to have already run the injected-expression pre-scan
/// (see `crate::compile`); this function assumes that check has passed.
pub fn parse(template: &str, registry: &HelperRegistry) -> Result<String, CompileError> {
    let matcher = HelperPrefixMatcher::build(registry);
    let frame = parse_frame(template, registry, matcher.as_ref(), None)?;
    Ok(frame.output)
}

/// Parses `input` until either it is exhausted (only valid when
/// `expected_close` is `None`, i.e. this frame's caller didn't open a block
/// on its behalf) or a `{{/...}}` closing that block is found.
///
/// `expected_close` is `Some(name)` only for the frame spawned immediately
/// after a `{{#name}}` push; it is `None` for the top-level call and for a
/// partial's expanded fragment, so a partial can never consume a closing tag
/// that belongs to whatever block happens to enclose the `{{>...}}` — each
/// frame only ever owns the single close its own caller pushed for it, with
/// no shared mutable state for a misbehaving fragment to corrupt.
fn parse_frame<'a>(
    mut input: &'a str,
    registry: &HelperRegistry,
    matcher: Option<&HelperPrefixMatcher>,
    expected_close: Option<String>,
) -> Result<Frame<'a>, CompileError> {
    let mut output = String::new();

    loop {
        if input.is_empty() {
            return match expected_close {
                None => Ok(Frame { output, tail: "" }),
                Some(top) => {
                    log::warn!("reached end of template with block {top:?} still open");
                    Err(CompileError::MissingClose { top })
                }
            };
        }

        if let Some(rest) = input.strip_prefix("{{{{") {
            log::trace!("dispatch: raw block open");
            let (open_tag, after_open) = accumulate_tag(rest, "{{{{", "}}}}", &['{'], matcher)?;
            if open_tag.is_name_empty() {
                return Err(CompileError::NameRequired { kind: "Raw block" });
            }

            const CLOSE_MARKER: &str = "{{{{/";
            let marker_pos = memmem::find(after_open.as_bytes(), CLOSE_MARKER.as_bytes())
                .ok_or_else(|| CompileError::MissingClose {
                    top: open_tag.name.clone(),
                })?;
            let body = after_open[..marker_pos].to_string();
            let after_marker = &after_open[marker_pos + CLOSE_MARKER.len()..];
            let (close_tag, tail_after_close) =
                accumulate_tag(after_marker, CLOSE_MARKER, "}}}}", &['{'], None)?;
            if close_tag.is_name_empty() {
                return Err(CompileError::NameRequired { kind: "Raw block" });
            }
            if close_tag.name != open_tag.name {
                return Err(CompileError::WrongClose {
                    expected: open_tag.name,
                });
            }

            let mut tag = open_tag;
            tag.block_contents = body;
            let rendered = registry.lookup_block(&tag.name)(&tag).into_result()?;
            output.push_str(&rendered);
            input = tail_after_close;
            continue;
        }

        if let Some(rest) = input.strip_prefix("{{!--") {
            log::trace!("dispatch: long comment");
            let (tag, residual) = accumulate_tag(rest, "{{!--", "--}}", &[], None)?;
            output.push_str("<%#");
            output.push_str(&tag.raw_contents);
            output.push_str("--%>");
            input = residual;
            continue;
        }

        if let Some(rest) = input.strip_prefix("{{!") {
            log::trace!("dispatch: short comment");
            let (tag, residual) = accumulate_tag(rest, "{{!", "}}", &['{'], None)?;
            output.push_str("<%#");
            output.push_str(&tag.raw_contents);
            output.push_str("%>");
            input = residual;
            continue;
        }

        if let Some(rest) = input.strip_prefix("{{#") {
            let (tag, residual) = accumulate_tag(rest, "{{#", "}}", &['{'], matcher)?;
            if tag.is_name_empty() {
                return Err(CompileError::NameRequired { kind: "Block" });
            }
            log::trace!("dispatch: block open {:?}", tag.name);
            let body_frame = parse_frame(residual, registry, matcher, Some(tag.name.clone()))?;

            let mut tag = tag;
            tag.block_contents = body_frame.output;
            let rendered = registry.lookup_block(&tag.name)(&tag).into_result()?;
            output.push_str(&rendered);
            input = body_frame.tail;
            continue;
        }

        if let Some(rest) = input.strip_prefix("{{/") {
            let (tag, residual) = accumulate_tag(rest, "{{/", "}}", &['{'], matcher)?;
            if tag.is_name_empty() {
                return Err(CompileError::NameRequired {
                    kind: "Closing block",
                });
            }
            log::trace!("dispatch: block close {:?}", tag.name);
            return match expected_close {
                None => {
                    log::warn!("unexpected closing block tag {{{{/{}}}}}", tag.name);
                    Err(CompileError::UnexpectedClose)
                }
                Some(expected) if tag.name != expected => {
                    log::warn!(
                        "expected closing {{{{/{expected}}}}}, found {{{{/{}}}}}",
                        tag.name
                    );
                    Err(CompileError::WrongClose { expected })
                }
                Some(_) => Ok(Frame {
                    output,
                    tail: residual,
                }),
            };
        }

        if let Some(rest) = input.strip_prefix("{{>") {
            let (tag, residual) = accumulate_tag(rest, "{{>", "}}", &['{'], matcher)?;
            if tag.is_name_empty() {
                return Err(CompileError::NameRequired { kind: "Partial" });
            }
            log::trace!("dispatch: partial {:?}", tag.name);
            let fragment = registry.lookup_partial(&tag.name)(&tag).into_result()?;
            let expanded = parse_frame(&fragment, registry, matcher, None)?;
            output.push_str(&expanded.output);
            input = residual;
            continue;
        }

        if let Some(rest) = input.strip_prefix("{{{") {
            let (tag, residual) = accumulate_tag(rest, "{{{", "}}}", &['{'], matcher)?;
            if tag.is_name_empty() {
                return Err(CompileError::NameRequired { kind: "Unescaped" });
            }
            if !tag.raw_options.is_empty() {
                return Err(CompileError::OptionsNotAllowed);
            }
            log::trace!("dispatch: unescaped {:?}", tag.name);
            let rendered = registry.lookup_unescaped()(&tag).into_result()?;
            output.push_str(&rendered);
            input = residual;
            continue;
        }

        if let Some(rest) = input.strip_prefix("{{") {
            let (tag, residual) = accumulate_tag(rest, "{{", "}}", &['{'], matcher)?;
            if tag.is_name_empty() {
                return Err(CompileError::NameRequired { kind: "Escaped" });
            }
            log::trace!("dispatch: escaped {:?}", tag.name);
            let rendered = registry.lookup_helper(&tag.name)(&tag).into_result()?;
            output.push_str(&rendered);
            input = residual;
            continue;
        }

        if input.starts_with("}}") {
            return Err(tag_lexer::stray_closer_error(&output));
        }

        // No delimiter recognized at the current position: advance by one
        // char boundary and keep scanning. Slicing `input` by byte offset
        // (rather than rebuilding an owned `String`) keeps this loop linear
        // in the template length.
        let ch = input.chars().next().expect("input is non-empty");
        output.push(ch);
        input = &input[ch.len_utf8()..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HelperOutcome;

    fn noop_registry() -> HelperRegistry {
        let mut registry = HelperRegistry::new();
        registry
            .register_helper(crate::registry::ESCAPED_FALLBACK, |tag| {
                HelperOutcome::Value(format!("@{}", tag.name))
            })
            .unwrap();
        registry
            .register_helper(crate::registry::UNESCAPED_FALLBACK, |tag| {
                HelperOutcome::Value(format!("@{}", tag.name))
            })
            .unwrap();
        registry
            .register_block("if", |tag| {
                HelperOutcome::Value(format!("<if:{}>{}</if>", tag.name, tag.block_contents))
            })
            .unwrap();
        registry
    }

    #[test]
    fn identity_passthrough_with_no_tags() {
        let registry = noop_registry();
        assert_eq!(parse("plain text", &registry).unwrap(), "plain text");
    }

    #[test]
    fn escaped_interpolation_dispatches_to_fallback() {
        let registry = noop_registry();
        assert_eq!(parse("{{ name }}", &registry).unwrap(), "@name");
    }

    #[test]
    fn block_close_mismatch_is_fatal() {
        let registry = noop_registry();
        let err = parse("{{#if a}}X{{/unless}}", &registry).unwrap_err();
        assert_eq!(
            err,
            CompileError::WrongClose {
                expected: "if".to_string()
            }
        );
    }

    #[test]
    fn unexpected_close_without_open_block() {
        let registry = noop_registry();
        let err = parse("{{/if}}", &registry).unwrap_err();
        assert_eq!(err, CompileError::UnexpectedClose);
    }

    #[test]
    fn missing_close_at_eof() {
        let registry = noop_registry();
        let err = parse("{{#if a}}X", &registry).unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingClose {
                top: "if".to_string()
            }
        );
    }

    #[test]
    fn stray_closer_outside_tag() {
        let registry = noop_registry();
        let err = parse("abc}}def", &registry).unwrap_err();
        assert!(matches!(err, CompileError::StrayCloser { .. }));
    }

    #[test]
    fn comments_emit_raw_contents_verbatim() {
        let registry = noop_registry();
        assert_eq!(
            parse("{{! hello world }}", &registry).unwrap(),
            "<%# hello world %>"
        );
        assert_eq!(
            parse("{{!-- hello {world} --}}", &registry).unwrap(),
            "<%# hello {world} --%>"
        );
    }

    /// A partial whose fragment contains a close tag for the block that
    /// encloses the `{{>...}}` must not be able to consume that block's
    /// close — the fragment owns nothing to close, so this is an
    /// `UnexpectedClose` raised while parsing the fragment itself, not a
    /// panic and not a close silently stolen from the enclosing `if`.
    #[test]
    fn partial_cannot_close_an_enclosing_block() {
        let mut registry = noop_registry();
        registry
            .register_partial("broken", |_tag| HelperOutcome::Value("{{/if}}".to_string()))
            .unwrap();
        let err = parse("{{#if a}}{{>broken}}{{/if}}", &registry).unwrap_err();
        assert_eq!(err, CompileError::UnexpectedClose);
    }

    /// A partial fragment that opens and closes its own block is unaffected
    /// by the fix above: the block it opens is entirely self-contained.
    #[test]
    fn partial_can_open_and_close_its_own_block() {
        let mut registry = noop_registry();
        registry
            .register_partial("greeting", |_tag| {
                HelperOutcome::Value("{{#if a}}hi{{/if}}".to_string())
            })
            .unwrap();
        assert_eq!(
            parse("{{>greeting}}", &registry).unwrap(),
            "<if:a>hi</if>"
        );
    }
}
