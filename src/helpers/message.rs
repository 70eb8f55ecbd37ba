/// Replace typed `\n` tokens with real line breaks.
///
/// A token whose backslash is itself escaped (`\\n`) is kept verbatim.
pub fn expand_newlines(message: &str) -> String {
    let mut expanded = String::with_capacity(message.len());
    let mut prev = None;
    let mut chars = message.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && prev != Some('\\') && chars.peek() == Some(&'n') {
            chars.next();
            expanded.push('\n');
            prev = Some('n');
            continue;
        }
        expanded.push(c);
        prev = Some(c);
    }
    expanded
}

/// Substitute every `{tag}` placeholder in `template` with `value`.
pub fn fill_tag(template: &str, tag: &str, value: &str) -> String {
    template.replace(&format!("{{{tag}}}"), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_newlines() {
        assert_eq!(expand_newlines(r"line1\nline2"), "line1\nline2");
        assert_eq!(expand_newlines(r"\nstarts"), "\nstarts");
        assert_eq!(expand_newlines(r"ends\n"), "ends\n");
        assert_eq!(expand_newlines(r"a\n\nb"), "a\n\nb");
        assert_eq!(expand_newlines("no tokens"), "no tokens");
    }

    #[test]
    fn test_escaped_newline_is_preserved() {
        assert_eq!(expand_newlines(r"keep \\n as is"), r"keep \\n as is");
        assert_eq!(expand_newlines(r"\\n then \n"), "\\\\n then \n");
    }

    #[test]
    fn test_other_escapes_untouched() {
        assert_eq!(expand_newlines(r"tab\t and \x"), r"tab\t and \x");
        assert_eq!(expand_newlines("trailing \\"), "trailing \\");
    }

    #[test]
    fn test_fill_tag() {
        let template = "Exit Code: {code}, again {code}; host {host}";
        assert_eq!(
            fill_tag(template, "code", "3"),
            "Exit Code: 3, again 3; host {host}"
        );
        assert_eq!(fill_tag("nothing here", "code", "3"), "nothing here");
    }
}
