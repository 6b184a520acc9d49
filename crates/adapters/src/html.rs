//! Minimal HTML rendering for the message container.

/// Escape text for inclusion in element content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render messages as an unordered list. An empty slice renders nothing.
#[must_use]
pub fn render_message_list<S: AsRef<str>>(messages: &[S]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul>");
    for message in messages {
        html.push_str("<li>");
        html.push_str(&escape_html(message.as_ref()));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}
