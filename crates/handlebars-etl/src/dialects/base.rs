//! The base dialect: the minimal helper set every registry starts from.

use crate::dialects::common::{
    each_helper, else_helper, if_helper, index_helper, key_helper, log_helper, raw_helper,
    unless_helper,
};
use crate::dialects::translate::translate_identifier;
use crate::registry::{HelperOutcome, HelperRegistry, ESCAPED_FALLBACK, UNESCAPED_FALLBACK};
use crate::tag_model::TagModel;

fn escaped_fallback(tag: &TagModel) -> HelperOutcome {
    format!("<%= {} %>", translate_identifier(&tag.name)).into()
}

fn unescaped_fallback(tag: &TagModel) -> HelperOutcome {
    format!("<%= raw({}) %>", translate_identifier(&tag.name)).into()
}

/// Builds the base dialect's registry: fallbacks, `else`/`log`/`@index`/`@key`,
/// and the `if`/`each`/`foreach`/`raw`/`unless` block-helpers.
pub fn registry() -> HelperRegistry {
    let mut registry = HelperRegistry::new();

    registry
        .register_helper(ESCAPED_FALLBACK, escaped_fallback)
        .expect("reserved fallback name is always valid");
    registry
        .register_helper(UNESCAPED_FALLBACK, unescaped_fallback)
        .expect("reserved fallback name is always valid");
    registry
        .register_helper("else", else_helper)
        .expect("literal helper name is always valid");
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
        .register_block("if", if_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("each", each_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("foreach", each_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("raw", raw_helper)
        .expect("literal helper name is always valid");
    registry
        .register_block("unless", unless_helper)
        .expect("literal helper name is always valid");

    registry
}
