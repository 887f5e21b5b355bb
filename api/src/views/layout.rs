use util::config;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Wraps `body` in the shared page chrome.
pub fn page(title: &str, body: &str) -> String {
    let title = html_escape(title);
    let project = html_escape(&config::project_name());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title} | {project}</title>
</head>
<body>
    <header><a href="/">{project}</a></header>
    <main>
{body}
    </main>
</body>
</html>"##
    )
}

/// `<ul class="errorlist">` for one field, or nothing.
pub fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<ul class="errorlist">"#);
    for message in messages {
        out.push_str(&format!("<li>{}</li>", html_escape(message)));
    }
    out.push_str("</ul>");
    out
}
