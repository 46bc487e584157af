//! Helper implementations shared by more than one dialect.
//!
//! Each function here is a `Fn(&TagModel) -> HelperOutcome` ready to hand to
//! `HelperRegistry::register_helper`/`register_block`.

use crate::dialects::translate::translate_arg;
use crate::error::CompileError;
use crate::registry::HelperOutcome;
use crate::tag_model::TagModel;

fn require_arg<'a>(tag: &'a TagModel, helper: &str) -> Result<&'a crate::tag_model::ArgModel, CompileError> {
    tag.first_arg().ok_or_else(|| {
        CompileError::DialectSpecific(format!(
            "The {helper} helper requires options, e.g. {{{{#{helper} options}}}}"
        ))
    })
}

/// `{{#if cond}}...{{else}}...{{/if}}` → a `cond do` chain with a trailing
/// catch-all arm, reproduced byte-for-byte even when no `{{else}}` was
/// present in the source (the catch-all is unconditional, see DESIGN.md).
pub fn if_helper(tag: &TagModel) -> HelperOutcome {
    match require_arg(tag, "if") {
        Ok(arg) => {
            let cond = translate_arg(arg);
            format!(
                "<%= cond do %>\n<% {cond} -> %>{}<% true -> %><% nil %>\n<% end %>\n",
                tag.block_contents
            )
            .into()
        }
        Err(err) => err.into(),
    }
}

/// `{{#unless cond}}...{{/unless}}` → a `cond do` with a single negated arm
/// and no catch-all (unlike `if`, see test vector in §8).
pub fn unless_helper(tag: &TagModel) -> HelperOutcome {
    match require_arg(tag, "unless") {
        Ok(arg) => {
            let cond = translate_arg(arg);
            format!(
                "<%= cond do %>\n<% !{cond} -> %>{}<% end %>\n",
                tag.block_contents
            )
            .into()
        }
        Err(err) => err.into(),
    }
}

/// `{{#each collection}}...{{/each}}` → a `for` comprehension over the
/// translated collection expression. `foreach` is registered as an alias.
pub fn each_helper(tag: &TagModel) -> HelperOutcome {
    match require_arg(tag, "each") {
        Ok(arg) => {
            let collection = translate_arg(arg);
            format!(
                "<%= for item <- {collection} do %>{}<% end %>\n",
                tag.block_contents
            )
            .into()
        }
        Err(err) => err.into(),
    }
}

/// `{{#raw}}...{{/raw}}` → the block's already-transpiled body, unwrapped.
pub fn raw_helper(tag: &TagModel) -> HelperOutcome {
    tag.block_contents.clone().into()
}

/// `{{else}}` → the default arm of a surrounding `cond do` chain.
pub fn else_helper(_tag: &TagModel) -> HelperOutcome {
    "<% true -> %>".into()
}

/// `{{log ...}}` → a comment noting the logged arguments; never evaluated.
pub fn log_helper(tag: &TagModel) -> HelperOutcome {
    let rendered = tag
        .args
        .iter()
        .map(|a| a.value.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("<%# log: {rendered} %>").into()
}

/// `{{@index}}` — the current iteration index inside an `each`/`foreach` body.
pub fn index_helper(_tag: &TagModel) -> HelperOutcome {
    "<%= index %>".into()
}

/// `{{@key}}` — the current iteration key inside an `each`/`foreach` body.
pub fn key_helper(_tag: &TagModel) -> HelperOutcome {
    "<%= key %>".into()
}
