//! Identifier rewriting shared by every stage of generation.
//!
//! - [`camel_case`]: snake-style name → camel-style identifier
//! - [`camel_case_path`]: the same, applied per segment of a dotted field path
//! - [`namespace_of`]: dotted package → single namespace identifier
//! - [`path_vars`]: `{var}` segments of a URL template

/// Convert a snake-style identifier to its camel-style form.
///
/// A leading `_` becomes `X`. An `_` followed by a lowercase letter is dropped.
/// Digits are copied as-is. Every other character starts a word: it is
/// upper-cased if it is a lowercase ASCII letter, and the run of lowercase
/// letters after it is copied unchanged.
///
/// ```
/// use umigen_core::ir::naming::camel_case;
///
/// assert_eq!(camel_case("_my_field_name_2"), "XMyFieldName_2");
/// assert_eq!(camel_case("user_id"), "UserId");
/// assert_eq!(camel_case(""), "");
/// ```
pub fn camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 1);
    let mut i = 0;
    if bytes.first() == Some(&b'_') {
        out.push(b'X');
        i += 1;
    }
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'_' && bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }
        out.push(c.to_ascii_uppercase());
        i += 1;
        while let Some(&next) = bytes.get(i) {
            if !next.is_ascii_lowercase() {
                break;
            }
            out.push(next);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// [`camel_case`] applied to each `.`-separated segment of a field path.
pub fn camel_case_path(path: &str) -> String {
    path.split('.').map(camel_case).collect::<Vec<_>>().join(".")
}

/// Normalize a dotted package name to a namespace identifier.
///
/// Empty segments are skipped; the first character of every other segment is
/// upper-cased when it is a lowercase ASCII letter.
///
/// ```
/// use umigen_core::ir::naming::namespace_of;
///
/// assert_eq!(namespace_of("helloworld.v1"), "HelloworldV1");
/// assert_eq!(namespace_of("HelloworldV1"), "HelloworldV1");
/// ```
pub fn namespace_of(package: &str) -> String {
    let mut out = String::with_capacity(package.len());
    for segment in package.split('.') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Names of the `{var}` segments of a URL path template, in order.
pub fn path_vars(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| segment.starts_with('{') && segment.ends_with('}'))
        .map(|segment| {
            segment
                .trim_start_matches('{')
                .trim_end_matches('}')
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_leading_underscore() {
        assert_eq!(camel_case("_my_field_name_2"), "XMyFieldName_2");
    }

    #[test]
    fn test_camel_case_empty() {
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_camel_case_first_letter_is_a_word_start() {
        assert_eq!(camel_case("id"), "Id");
        assert_eq!(camel_case("user_id"), "UserId");
    }

    #[test]
    fn test_camel_case_keeps_existing_capitals() {
        assert_eq!(camel_case("HTTPRule"), "HTTPRule");
        assert_eq!(camel_case("fooBar"), "FooBar");
    }

    #[test]
    fn test_camel_case_underscore_before_non_lowercase_is_kept() {
        assert_eq!(camel_case("a__b"), "A_B");
        assert_eq!(camel_case("v_1"), "V_1");
        assert_eq!(camel_case("trailing_"), "Trailing_");
    }

    #[test]
    fn test_camel_case_lone_underscore() {
        assert_eq!(camel_case("_"), "X");
    }

    #[test]
    fn test_camel_case_non_ascii_passes_through() {
        assert_eq!(camel_case("größe"), "Größe");
    }

    #[test]
    fn test_camel_case_path() {
        assert_eq!(camel_case_path("user.display_name"), "User.DisplayName");
        assert_eq!(camel_case_path("*"), "*");
    }

    #[test]
    fn test_namespace_of() {
        assert_eq!(namespace_of("helloworld.v1"), "HelloworldV1");
        assert_eq!(namespace_of("google.protobuf"), "GoogleProtobuf");
        assert_eq!(namespace_of(""), "");
        assert_eq!(namespace_of("a..b"), "AB");
    }

    #[test]
    fn test_namespace_of_is_idempotent() {
        for package in ["helloworld.v1", "api.user.v2", "x", "Already.Upper"] {
            let once = namespace_of(package);
            assert_eq!(namespace_of(&once), once);
        }
    }

    #[test]
    fn test_path_vars() {
        assert_eq!(
            path_vars("/v1/users/{user_id}/posts/{post_id}"),
            vec!["user_id".to_string(), "post_id".to_string()]
        );
        assert!(path_vars("/v1/users").is_empty());
        assert!(path_vars("").is_empty());
    }

    #[test]
    fn test_path_vars_requires_whole_segment() {
        assert_eq!(path_vars("/v1/{name=messages/*}"), Vec::<String>::new());
        assert_eq!(path_vars("/v1/x{id}/{ok}"), vec!["ok".to_string()]);
    }
}
