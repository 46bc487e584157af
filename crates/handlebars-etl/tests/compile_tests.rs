use handlebars_etl::dialects::sendgrid;
use handlebars_etl::{compile, compile_with};

#[test]
fn scenario_1_escaped_interpolation() {
    assert_eq!(
        compile_with("<p>Hello {{ firstName }}</p>", &sendgrid::registry()).unwrap(),
        "<p>Hello <%= @firstName %></p>"
    );
}

#[test]
fn scenario_2_dotted_path_interpolation() {
    assert_eq!(
        compile_with(
            "<p>Hello {{user.profile.firstName}}</p>",
            &sendgrid::registry()
        )
        .unwrap(),
        "<p>Hello <%= get_in(@user, [:profile, :firstName]) %></p>"
    );
}

#[test]
fn scenario_3_if_else_block() {
    let input = "{{#if user}}\n<p>Dear Sir</p>\n{{else}}\n<p>Dear Customer</p>\n{{/if}}\n";
    let expected = "<%= cond do %>\n<% @user -> %>\n<p>Dear Sir</p>\n<% true -> %>\n<p>Dear Customer</p>\n<% true -> %><% nil %>\n<% end %>\n\n";
    assert_eq!(compile_with(input, &sendgrid::registry()).unwrap(), expected);
}

#[test]
fn scenario_4_unless_block_with_root_stripping() {
    let input = "{{#unless user.active}}<p>X {{@root.supportPhone}}</p>{{/unless}}";
    let expected = "<%= cond do %>\n<% !get_in(@user, [:active]) -> %><p>X <%= @supportPhone %></p><% end %>\n";
    assert_eq!(compile_with(input, &sendgrid::registry()).unwrap(), expected);
}

#[test]
fn scenario_5_insert_with_default() {
    let input = "<p>Hello {{insert name \"Customer\"}}!";
    let expected = "<p>Hello <%= @name || \"Customer\" %>!";
    assert_eq!(compile_with(input, &sendgrid::registry()).unwrap(), expected);
}

#[test]
fn scenario_6_wrong_close_is_rejected() {
    let err = compile_with("{{#if a}}X{{/unless}}", &sendgrid::registry()).unwrap_err();
    assert!(err.contains("Expected closing {{/if}} tag."));
}

#[test]
fn raw_block_body_passes_through_unparsed() {
    let registry = sendgrid::registry();
    let input = "{{{{raw}}}}{{ not a real tag }}{{{{/raw}}}}";
    assert_eq!(compile_with(input, &registry).unwrap(), "{{ not a real tag }}");
}

#[test]
fn partial_body_is_recursively_transpiled() {
    let mut registry = sendgrid::registry();
    registry
        .register_partial_template("greeting", "Hi {{ firstName }}!")
        .unwrap();
    assert_eq!(
        compile_with("{{>greeting}}", &registry).unwrap(),
        "Hi <%= @firstName %>!"
    );
}

#[test]
fn nested_blocks_transpile_inside_out() {
    let registry = sendgrid::registry();
    let input = "{{#if outer}}{{#if inner}}yes{{/if}}{{/if}}";
    let etl = compile_with(input, &registry).unwrap();
    assert!(etl.contains("@outer"));
    assert!(etl.contains("@inner"));
    assert!(etl.contains("yes"));
}

#[test]
fn default_registry_is_the_base_dialect() {
    assert_eq!(compile("{{ firstName }}").unwrap(), "<%= @firstName %>");
    // The base dialect has no `insert` helper: its name is left unmatched by
    // the prefix matcher, so the tag lexer splits on the first whitespace
    // and the unrecognized "insert" name falls back to plain interpolation.
    assert_eq!(compile("{{insert name \"Customer\"}}").unwrap(), "<%= @insert %>");
}
