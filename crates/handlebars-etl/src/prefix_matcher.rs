//! Builds a longest-match alternation over registered helper names so that
//! multi-word helpers (`else if`, `else greaterThan`, ...) are recognized as
//! a single tag name instead of being split on the first whitespace.

use regex::Regex;

use crate::registry::HelperRegistry;

pub struct HelperPrefixMatcher {
    pattern: Regex,
}

impl HelperPrefixMatcher {
    /// Builds a matcher from every registered helper/block-helper name.
    /// Returns `None` when the registry has no dispatchable names, matching
    /// the spec's "if empty, the matcher is absent."
    pub fn build(registry: &HelperRegistry) -> Option<Self> {
        let mut names = registry.dispatchable_names();
        if names.is_empty() {
            return None;
        }
        // Longest-first so "else if" wins over "else" in the alternation.
        names.sort_by_key(|name| std::cmp::Reverse(name.chars().count()));

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?u)^(?P<tag_name>{alternation})(?P<tag_options>.*)$");

        Some(Self {
            pattern: Regex::new(&pattern).expect("alternation of escaped literals is always valid"),
        })
    }

    /// Attempts to split `trimmed` into `(tag_name, rest)` using the longest
    /// registered name that prefixes it. `rest` is everything following the
    /// matched name, unstripped of its own leading whitespace.
    pub fn split(&self, trimmed: &str) -> Option<(String, String)> {
        let captures = self.pattern.captures(trimmed)?;
        let name = captures.name("tag_name")?.as_str().to_string();
        let rest = captures.name("tag_options")?.as_str().to_string();
        Some((name, rest))
    }
}
