//! HTML escaping for user text placed into email bodies

/// Escapes `& < > " '`, each occurrence exactly once. Everything else passes through.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped text with line breaks rendered as `<br>`, for HTML bodies only.
pub fn html_paragraph(input: &str) -> String {
    escape_html(input)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_the_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "Hello there, 100% plain text with émojis 🚀 and\nnewlines";
        assert_eq!(escape_html(text), text);
    }

    #[test]
    fn test_escaping_applies_once_per_pass() {
        let once = escape_html("<b>&</b>");
        assert_eq!(once, "&lt;b&gt;&amp;&lt;/b&gt;");

        let twice = escape_html(&once);
        assert_eq!(twice, "&amp;lt;b&amp;gt;&amp;amp;&amp;lt;/b&amp;gt;");
        assert_eq!(twice, once.replace('&', "&amp;"));
    }

    #[test]
    fn test_html_paragraph_breaks_lines() {
        assert_eq!(html_paragraph("line one\r\nline <two>\nend"), "line one<br>line &lt;two&gt;<br>end");
        assert_eq!(escape_html("a\nb"), "a\nb");
    }
}
