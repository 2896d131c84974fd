//! Result entries and the adapters that render them.
//!
//! [`ResultEntries`] is a plain value: `clear` and `display` consume the
//! current entries and return the next ones, so a search builds its output
//! without touching shared state. Rendering to HTML or a terminal happens
//! only at the edge, in `render_html`, `render_page` and `render_text`.

use serde::Serialize;

use crate::types::Color;

/// One rendered line group with its color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub message: String,
    pub color: Color,
}

/// Ordered output of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultEntries(Vec<ResultEntry>);

impl ResultEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every prior entry
    pub fn clear(self) -> Self {
        Self::new()
    }

    /// Append an entry after all existing ones
    pub fn display(mut self, message: impl Into<String>, color: Color) -> Self {
        self.0.push(ResultEntry {
            message: message.into(),
            color,
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultEntry> {
        self.0.iter()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<div>` per entry; newlines become `<br>`
pub fn render_html(entries: &ResultEntries) -> String {
    entries
        .iter()
        .map(|entry| {
            let body = entry
                .message
                .split('\n')
                .map(escape_html)
                .collect::<Vec<_>>()
                .join("<br>");
            format!(
                "<div class=\"result {}\" style=\"color: {}\">{}</div>",
                entry.color,
                entry.color.css(),
                body
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full search page: the ZIP form followed by the result container
pub fn render_page(zipcode: Option<&str>, entries: Option<&ResultEntries>) -> String {
    let value = zipcode.map(escape_html).unwrap_or_default();
    let results = entries.map(render_html).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Find Your Representatives</title>
</head>
<body>
<h1>Find Your Representatives</h1>
<form id="zipcode-form" action="/lookup" method="get">
<label for="zipcode">ZIP code</label>
<input id="zipcode" name="zipcode" maxlength="5" value="{value}" required>
<button type="submit">Search</button>
</form>
<div id="result">
{results}
</div>
</body>
</html>
"#
    )
}

/// Plain-text rendering; with `ansi` each entry is wrapped in its color
pub fn render_text(entries: &ResultEntries, ansi: bool) -> String {
    entries
        .iter()
        .map(|entry| {
            if ansi {
                format!("\x1b[{}m{}\x1b[0m", entry.color.ansi_code(), entry.message)
            } else {
                format!("[{}] {}", entry.color, entry.message.replace('\n', "\n  "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
