//! String helpers shared by codegen and emission.

/// Check if a property name has to be quoted in an object type or literal.
///
/// True for the empty string, names not starting with a letter, `_` or `$`,
/// and names containing anything other than ASCII alphanumerics, `_` and `$`.
pub fn needs_quoting(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    !(first.is_ascii_alphabetic() || first == '_' || first == '$')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a single-quoted TypeScript literal.
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", escape_single_quoted(name))
    } else {
        name.to_string()
    }
}

/// Flatten a schema comment for a one-line `/** ... */` doc comment.
///
/// `//` markers and line breaks are removed. A `*/` would close the doc
/// comment early, so it is defused.
pub fn flatten_comment(comment: &str) -> String {
    comment
        .replace("//", "")
        .replace(['\n', '\r'], "")
        .replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_quoting() {
        assert!(!needs_quoting("user_id"));
        assert!(!needs_quoting("$ref"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("1st"));
        assert!(needs_quoting("Content-Type"));
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("name"), "name");
        assert_eq!(quote_if_needed("Content-Type"), "'Content-Type'");
        assert_eq!(quote_if_needed("it's"), "'it\\'s'");
    }

    #[test]
    fn test_escape_single_quoted() {
        assert_eq!(escape_single_quoted("/v1/{name}"), "/v1/{name}");
        assert_eq!(escape_single_quoted("a'b\\c"), "a\\'b\\\\c");
        assert_eq!(escape_single_quoted("a\nb"), "a\\nb");
    }

    #[test]
    fn test_flatten_comment() {
        assert_eq!(flatten_comment(" Sends a greeting\n"), " Sends a greeting");
        assert_eq!(
            flatten_comment(" line one\n // line two\n"),
            " line one  line two"
        );
        assert_eq!(flatten_comment("ends */ early"), "ends *\\/ early");
        assert_eq!(flatten_comment(""), "");
    }
}
