//! The Sendgrid dialect: the base dialect plus comparison block-helpers,
//! `else`-chained comparison helpers, and the `insert` default-value helper.

use crate::dialects::common::{
    each_helper, else_helper, if_helper, index_helper, key_helper, log_helper, raw_helper,
    unless_helper,
};
use crate::dialects::translate::{translate_arg, translate_identifier};
use crate::error::CompileError;
use crate::registry::{HelperOutcome, HelperRegistry, ESCAPED_FALLBACK, UNESCAPED_FALLBACK};
use crate::tag_model::{ArgModel, TagModel};

fn escaped_fallback(tag: &TagModel) -> HelperOutcome {
    format!("<%= {} %>", translate_identifier(&tag.name)).into()
}

fn unescaped_fallback(tag: &TagModel) -> HelperOutcome {
    format!("<%= raw({}) %>", translate_identifier(&tag.name)).into()
}

fn require_two_args<'a>(
    tag: &'a TagModel,
    helper: &str,
) -> Result<(&'a ArgModel, &'a ArgModel), CompileError> {
    match (tag.args.first(), tag.args.get(1)) {
        (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
        _ => Err(CompileError::DialectSpecific(format!(
            "The {helper} helper requires two options, e.g. {{{{#{helper} a b}}}}"
        ))),
    }
}

/// Builds a comparison block-helper (`greaterThan`, `equals`, ...): a
/// `cond do` with one arm for the comparison and a trailing catch-all, in the
/// same shape as `if_helper`.
fn comparison_block(
    name: &'static str,
    operator: &'static str,
) -> impl Fn(&TagModel) -> HelperOutcome {
    move |tag: &TagModel| match require_two_args(tag, name) {
        Ok((lhs, rhs)) => {
            let lhs = translate_arg(lhs);
            let rhs = translate_arg(rhs);
            format!(
                "<%= cond do %>\n<% {lhs} {operator} {rhs} -> %>{}<% true -> %><% nil %>\n<% end %>\n",
                tag.block_contents
            )
            .into()
        }
        Err(err) => err.into(),
    }
}

/// Builds an `else <op> ...` plain helper: an additional arm appended inside
/// a surrounding `cond do` chain, mirroring `else_helper` but with a real
/// condition instead of the bare `true` catch-all.
fn else_comparison(name: &'static str, operator: &'static str) -> impl Fn(&TagModel) -> HelperOutcome {
    move |tag: &TagModel| match require_two_args(tag, name) {
        Ok((lhs, rhs)) => {
            let lhs = translate_arg(lhs);
            let rhs = translate_arg(rhs);
            format!("<% {lhs} {operator} {rhs} -> %>").into()
        }
        Err(err) => err.into(),
    }
}

fn else_if_helper(tag: &TagModel) -> HelperOutcome {
    match tag.first_arg() {
        Some(arg) => format!("<% {} -> %>", translate_arg(arg)).into(),
        None => CompileError::DialectSpecific(
            "The else if helper requires options, e.g. {{else if options}}".to_string(),
        )
        .into(),
    }
}

fn else_unless_helper(tag: &TagModel) -> HelperOutcome {
    match tag.first_arg() {
        Some(arg) => format!("<% !{} -> %>", translate_arg(arg)).into(),
        None => CompileError::DialectSpecific(
            "The else unless helper requires options, e.g. {{else unless options}}".to_string(),
        )
        .into(),
    }
}

/// `{{insert name "default"}}` → `<%= @name || "default" %>`.
fn insert_helper(tag: &TagModel) -> HelperOutcome {
    match require_two_args(tag, "insert") {
        Ok((primary, fallback)) => format!(
            "<%= {} || {} %>",
            translate_arg(primary),
            translate_arg(fallback)
        )
        .into(),
        Err(err) => err.into(),
    }
}

/// Builds the Sendgrid dialect's registry: the base dialect's `else`/`log`/
/// `@index`/`@key` helpers and `if`/`unless`/`each`/`raw` block-helpers,
/// augmented with comparison block-helpers, `else`-chained comparison
/// helpers, and `insert`.
pub fn registry() -> HelperRegistry {
    let mut registry = HelperRegistry::new();

    registry
        .register_helper(ESCAPED_FALLBACK, escaped_fallback)
        .expect("reserved fallback name is always valid");
    registry
        .register_helper(UNESCAPED_FALLBACK, unescaped_fallback)
        .expect("reserved fallback name is always valid");
    registry
        .register_helper("log", log_helper)
        .expect("literal helper name is always valid");
    registry
        .register_helper("@index", index_helper)
        .expect("literal helper name is always valid");
    registry
        .register_helper("@key", key_helper)
        .expect("literal helper name is always valid");
    registry
        .register_helper("insert", insert_helper)
        .expect("literal helper name is always valid");

    registry
        .register_helper("else", else_helper)
        .expect("literal helper name is always valid");
    registry
        .register_helper("else if", else_if_helper)
        .expect("literal helper name is always valid");
    registry
        .register_helper("else unless", else_unless_helper)
        .expect("literal helper name is always valid");
    registry
        .register_helper("else and", else_comparison("else and", "&&"))
        .expect("literal helper name is always valid");
    registry
        .register_helper("else or", else_comparison("else or", "||"))
        .expect("literal helper name is always valid");
    registry
        .register_helper("else equals", else_comparison("else equals", "=="))
        .expect("literal helper name is always valid");
    registry
        .register_helper("else notEquals", else_comparison("else notEquals", "!="))
        .expect("literal helper name is always valid");
    registry
        .register_helper(
            "else greaterThan",
            else_comparison("else greaterThan", ">"),
        )
        .expect("literal helper name is always valid");
    registry
        .register_helper("else lessThan", else_comparison("else lessThan", "<"))
        .expect("literal helper name is always valid");

    registry
        .register_block("if", if_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("unless", unless_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("each", each_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("raw", raw_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("and", comparison_block("and", "&&"))
        .expect("literal helper name is always valid");
    registry
        .register_block("or", comparison_block("or", "||"))
        .expect("literal helper name is always valid");
    registry
        .register_block("equals", comparison_block("equals", "=="))
        .expect("literal helper name is always valid");
    registry
        .register_block("notEquals", comparison_block("notEquals", "!="))
        .expect("literal helper name is always valid");
    registry
        .register_block("greaterThan", comparison_block("greaterThan", ">"))
        .expect("literal helper name is always valid");
    registry
        .register_block("lessThan", comparison_block("lessThan", "<"))
        .expect("literal helper name is always valid");

    registry
}
