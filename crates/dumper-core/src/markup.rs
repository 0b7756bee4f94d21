#![forbid(unsafe_code)]

//! Markup helpers: escaping, anchors, and the cursor wrapper.

/// Opening tag of the wrapper around the newest ASCII glyph.
pub const CURSOR_OPEN: &str = "<span class='c'>";
pub const CURSOR_CLOSE: &str = "</span>";

/// HTML-escape text content.
///
/// Substitutes `& < > " ' /`; every other character passes through.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

/// HTML-escape a string into the output buffer.
pub fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
}

/// Escape a single-quoted attribute value. `/` is left alone so URLs stay
/// readable.
fn escape_attr_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

/// `<a href='url'>`
pub fn open_anchor(out: &mut String, url: &str) {
    out.push_str("<a href='");
    escape_attr_into(out, url);
    out.push_str("'>");
}

pub fn close_anchor(out: &mut String) {
    out.push_str("</a>");
}

/// An anchor around already-rendered inner markup.
pub fn push_anchor(out: &mut String, url: &str, inner: &str) {
    open_anchor(out, url);
    out.push_str(inner);
    close_anchor(out);
}

/// Wrap a glyph in the cursor span, escaping it.
pub fn push_cursor(out: &mut String, glyph: char) {
    out.push_str(CURSOR_OPEN);
    let mut buf = [0u8; 4];
    escape_into(out, glyph.encode_utf8(&mut buf));
    out.push_str(CURSOR_CLOSE);
}

/// Remove the first cursor wrapper, keeping its contents.
#[must_use]
pub fn strip_cursor(line: &str) -> String {
    let Some(start) = line.find(CURSOR_OPEN) else {
        return line.to_string();
    };
    let inner_start = start + CURSOR_OPEN.len();
    let Some(len) = line[inner_start..].find(CURSOR_CLOSE) else {
        return line.to_string();
    };
    let inner_end = inner_start + len;

    let mut out = String::with_capacity(line.len());
    out.push_str(&line[..start]);
    out.push_str(&line[inner_start..inner_end]);
    out.push_str(&line[inner_end + CURSOR_CLOSE.len()..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_each_special_character() {
        assert_eq!(escape("&"), "&amp;");
        assert_eq!(escape("<"), "&lt;");
        assert_eq!(escape(">"), "&gt;");
        assert_eq!(escape("\""), "&quot;");
        assert_eq!(escape("'"), "&#x27;");
        assert_eq!(escape("/"), "&#x2F;");
    }

    #[test]
    fn escape_is_identity_on_safe_text() {
        let safe = "AAAA..OpenAI ~!@#$%^*()";
        assert_eq!(escape(safe), safe);
    }

    #[test]
    fn escape_mixed() {
        assert_eq!(
            escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn anchor_keeps_slashes_in_href() {
        let mut out = String::new();
        push_anchor(&mut out, "https://example.com/?a=1&b='2'", "x");
        assert_eq!(
            out,
            "<a href='https://example.com/?a=1&amp;b=&#x27;2&#x27;'>x</a>"
        );
    }

    #[test]
    fn cursor_escapes_glyph() {
        let mut out = String::new();
        push_cursor(&mut out, '<');
        assert_eq!(out, "<span class='c'>&lt;</span>");
    }

    #[test]
    fn strip_cursor_unwraps_once() {
        let line = "41 AA<span class='c'>A</span> 00000000";
        assert_eq!(strip_cursor(line), "41 AAA 00000000");
        assert_eq!(strip_cursor("no cursor"), "no cursor");
    }

    #[test]
    fn strip_cursor_keeps_entities() {
        let line = "3C <span class='c'>&lt;</span> FFFFFFF1";
        assert_eq!(strip_cursor(line), "3C &lt; FFFFFFF1");
    }
}
