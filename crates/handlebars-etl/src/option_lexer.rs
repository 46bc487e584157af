//! Splits a tag's trimmed option string into positional args and kwargs.

use indexmap::IndexMap;

use crate::error::CompileError;
use crate::tag_model::ArgModel;

/// Parses `options` (already trimmed of leading/trailing whitespace by the
/// caller) into an ordered list of positional args and an ordered map of
/// kwargs, in the order they appeared.
pub fn parse(options: &str) -> Result<(Vec<ArgModel>, IndexMap<String, ArgModel>), CompileError> {
    let mut args = Vec::new();
    let mut kwargs = IndexMap::new();

    for token in tokenize(options)? {
        match split_kwarg(&token) {
            Some((key, value)) => {
                kwargs.insert(key, value);
            }
            None => args.push(unwrap_quotes(&token)),
        }
    }

    Ok((args, kwargs))
}

/// Splits `options` into whitespace-separated tokens, treating the contents
/// of a double-quoted run as opaque (its internal whitespace does not end
/// the token). Consecutive whitespace between tokens collapses.
fn tokenize(options: &str) -> Result<Vec<String>, CompileError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in options.chars() {
        if in_quotes {
            current.push(ch);
            if ch == '"' {
                in_quotes = false;
            }
            continue;
        }

        if ch == '"' {
            in_quotes = true;
            current.push(ch);
        } else if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(CompileError::UnterminatedQuote {
            accumulated: current,
        });
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// If `token` contains an `=` outside of a quoted run, splits it into
/// `(key, value)`. A token that is itself a single quoted literal (e.g.
/// `"a=b"`) is never treated as a kwarg, since the `=` there is inside quotes.
fn split_kwarg(token: &str) -> Option<(String, ArgModel)> {
    let mut in_quotes = false;
    for (i, ch) in token.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '=' if !in_quotes => {
                let key = token[..i].to_string();
                let value_raw = &token[i + '='.len_utf8()..];
                return Some((key, unwrap_quotes(value_raw)));
            }
            _ => {}
        }
    }
    None
}

/// Strips a single matching pair of surrounding double quotes, marking the
/// result `quoted`. A token not wrapped in quotes is returned unquoted.
fn unwrap_quotes(raw: &str) -> ArgModel {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        ArgModel::quoted(&raw[1..raw.len() - 1])
    } else {
        ArgModel::unquoted(raw)
    }
}
