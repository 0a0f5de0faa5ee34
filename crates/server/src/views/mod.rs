//! Server-rendered HTML pages.
//!
//! Every value interpolated into markup goes through [`escape`].

use axum::http::StatusCode;

use crate::forms::FieldErrors;

pub mod projects;
pub mod tasks;

pub const STYLESHEET_PATH: &str = "/assets/app.css";

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Taskboard</title>
<link rel="stylesheet" href="{stylesheet}">
</head>
<body>
<nav>
<a href="/">Taskboard</a>
<a href="/projects">Projects</a>
<a href="/projects/add">New project</a>
<a href="/tasks/add">New task</a>
</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        stylesheet = STYLESHEET_PATH,
        body = body,
    )
}

pub fn home() -> String {
    layout(
        "Welcome",
        r#"<p>Plan projects and keep track of what is due.</p>
<p><a class="button" href="/projects">Browse projects</a> <a class="button" href="/projects/add">Start a project</a></p>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        &format!(
            r#"<p class="error">{}</p>
<p><a href="/projects">Back to projects</a></p>"#,
            escape(message)
        ),
    )
}

/// Inline messages for one field, empty when the field is valid.
pub(crate) fn field_errors(errors: &FieldErrors, field: &str) -> String {
    let messages = errors.field(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect();
    format!(r#"<ul class="field-errors" id="{}-errors">{}</ul>"#, field, items)
}
