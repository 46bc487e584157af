//! The variable translation contract shared by every dialect helper: turns a
//! source identifier path into the target language's access expression.

use crate::tag_model::ArgModel;

const ROOT_PREFIX: &str = "@root.";

/// Translates a bare identifier path (`user.profile.firstName`, `@root.x`,
/// `this.value`) into its ETL access expression.
pub fn translate_identifier(raw: &str) -> String {
    let stripped = raw.strip_prefix(ROOT_PREFIX).unwrap_or(raw);
    let mut segments = stripped.split('.');
    let head = segments.next().unwrap_or("");
    let rest: Vec<&str> = segments.collect();

    if rest.is_empty() {
        if head.starts_with("this") {
            head.to_string()
        } else {
            format!("@{head}")
        }
    } else {
        let keys = rest
            .iter()
            .map(|k| format!(":{k}"))
            .collect::<Vec<_>>()
            .join(", ");
        if head.starts_with("this") {
            format!("get_in({head}, [{keys}])")
        } else {
            format!("get_in(@{head}, [{keys}])")
        }
    }
}

/// Translates a single argument: a quoted literal is re-emitted verbatim,
/// an identifier goes through `translate_identifier`.
pub fn translate_arg(arg: &ArgModel) -> String {
    if arg.quoted {
        format!("\"{}\"", arg.value)
    } else {
        translate_identifier(&arg.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_gets_at_prefix() {
        assert_eq!(translate_identifier("firstName"), "@firstName");
    }

    #[test]
    fn multi_segment_uses_get_in() {
        assert_eq!(
            translate_identifier("user.profile.firstName"),
            "get_in(@user, [:profile, :firstName])"
        );
    }

    #[test]
    fn root_prefix_is_stripped() {
        assert_eq!(translate_identifier("@root.supportPhone"), "@supportPhone");
    }

    #[test]
    fn this_prefixed_segment_has_no_at_sign() {
        assert_eq!(translate_identifier("this.value"), "get_in(this, [:value])");
        assert_eq!(translate_identifier("this"), "this");
    }

    #[test]
    fn quoted_arg_is_re_emitted_verbatim() {
        assert_eq!(translate_arg(&ArgModel::quoted("Customer")), "\"Customer\"");
    }

    #[test]
    fn unquoted_arg_goes_through_identifier_translation() {
        assert_eq!(translate_arg(&ArgModel::unquoted("name")), "@name");
    }
}
