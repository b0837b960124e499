//! Comment stripping for Python handler source.
//!
//! Rules, applied left to right in a single pass:
//!
//! - `'''...'''` and `"""..."""` blocks are removed; newlines inside them are kept so
//!   that line structure survives. An unterminated block runs to the end of the text.
//! - `#` starts a comment that runs to the end of the line; the newline is kept.
//! - A `'` or `"` string literal is copied through verbatim (honouring backslash
//!   escapes, ending at the closing quote or the end of the line), so a `#` inside a
//!   string is not a comment.

const TRIPLE_QUOTES: [&str; 2] = ["'''", "\"\"\""];

/// Removes docstrings, block strings and line comments from `source`.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if let Some(delim) = TRIPLE_QUOTES.iter().find(|d| rest.starts_with(**d)) {
            let body = &rest[delim.len()..];
            let (inner, consumed) = match body.find(delim) {
                Some(end) => (&body[..end], delim.len() * 2 + end),
                None => (body, rest.len()),
            };
            out.extend(inner.chars().filter(|&ch| ch == '\n'));
            rest = &rest[consumed..];
        } else if c == '#' {
            let end = rest.find('\n').unwrap_or(rest.len());
            rest = &rest[end..];
        } else if c == '\'' || c == '"' {
            let len = string_literal_len(rest, c);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Byte length of the single-line string literal at the start of `text`.
fn string_literal_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' => return i,
            c if c == quote => return i + c.len_utf8(),
            _ => {}
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_line_comments_but_keeps_newlines() {
        let src = "x = 1  # return 'nope'\nreturn 'yes'\n";
        assert_eq!(strip_comments(src), "x = 1  \nreturn 'yes'\n");
    }

    #[test]
    fn removes_both_docstring_styles() {
        let src = "def f():\n    '''\n    return 'a'\n    '''\n    \"\"\"return 'b'\"\"\"\n    return 'c'\n";
        let stripped = strip_comments(src);
        assert!(!stripped.contains("'a'"));
        assert!(!stripped.contains("'b'"));
        assert!(stripped.contains("return 'c'"));
        assert_eq!(stripped.lines().count(), src.lines().count());
    }

    #[test]
    fn hash_inside_string_is_not_a_comment() {
        let src = "return \"#channel\"  # trailing\n";
        assert_eq!(strip_comments(src), "return \"#channel\"  \n");
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let src = r#"s = 'it\'s # here'"#;
        assert_eq!(strip_comments(src), src);
    }

    #[test]
    fn unterminated_block_string_runs_to_end() {
        assert_eq!(strip_comments("a\n'''\nreturn 'x'\n"), "a\n\n\n");
    }
}
