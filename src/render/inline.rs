//! Inline-formatting composition.

use crate::api::RichTextSpan;

/// Compose annotated spans into one Markdown-formatted string.
///
/// Each annotation wraps the span content independently, always in the
/// sequence bold, italic, code, link, whatever order the source object
/// carried its keys in. Content is passed through verbatim; a span
/// containing `*` or backticks is not escaped.
pub fn compose(spans: &[RichTextSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        let mut text = span.plain_text.clone();
        if span.annotations.bold {
            text = format!("**{text}**");
        }
        if span.annotations.italic {
            text = format!("*{text}*");
        }
        if span.annotations.code {
            text = format!("`{text}`");
        }
        if let Some(href) = &span.href {
            text = format!("[{text}]({href})");
        }
        out.push_str(&text);
    }
    out
}
