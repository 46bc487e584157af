//! Transpiles Handlebars-style templates into an embedded template language
//! (ETL): variable interpolations become `<%= ... %>`, comments become
//! `<%# ... %>`, and control-flow becomes `<% ... %>`-guarded blocks.
//!
//! The transpiler itself never evaluates a template; downstream rendering of
//! the emitted ETL against a data context is out of scope for this crate.
//!
//! ```
//! let etl = handlebars_etl::compile("<p>Hello {{ name }}</p>").unwrap();
//! assert_eq!(etl, "<p>Hello <%= @name %></p>");
//! ```

pub mod dialects;
pub mod error;
mod option_lexer;
mod parser;
mod prefix_matcher;
pub mod registry;
mod tag_lexer;
pub mod tag_model;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CompileError;
use crate::registry::HelperRegistry;

/// Matches any already-present ETL expression in a source template — the
/// injection defense described in §3/§6: such input is rejected outright
/// rather than transpiled, since it could smuggle arbitrary ETL/EEx code
/// past a caller that trusts the compiled output.
static INJECTED_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<%.*?%>").expect("literal pattern is always valid"));

fn reject_injected_expressions(template: &str) -> Result<(), CompileError> {
    if INJECTED_EXPRESSION.is_match(template) {
        log::warn!("rejecting template containing an embedded ETL expression");
        return Err(CompileError::InjectedExpression);
    }
    Ok(())
}

/// Compiles `template` against the base dialect's default registry.
pub fn compile(template: &str) -> Result<String, String> {
    compile_with(template, &HelperRegistry::default())
}

/// Compiles `template` against a caller-supplied registry.
pub fn compile_with(template: &str, registry: &HelperRegistry) -> Result<String, String> {
    reject_injected_expressions(template).map_err(|e| e.to_string())?;
    parser::parse(template, registry).map_err(|e| e.to_string())
}

/// Like `compile`, but panics with the error message on failure.
pub fn compile_or_panic(template: &str) -> String {
    compile(template).unwrap_or_else(|err| panic!("{err}"))
}

/// Like `compile_with`, but panics with the error message on failure.
pub fn compile_with_or_panic(template: &str, registry: &HelperRegistry) -> String {
    compile_with(template, registry).unwrap_or_else(|err| panic!("{err}"))
}

/// The base dialect's registry (helpers `else`, `log`, `@index`, `@key`;
/// block-helpers `if`, `each`, `foreach`, `raw`, `unless`).
pub fn default_registry() -> HelperRegistry {
    dialects::base::registry()
}
