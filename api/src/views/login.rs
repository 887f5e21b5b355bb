use super::layout::{html_escape, page};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login form. `error` is shown above the inputs when set.
pub fn render(next: &str, username: &str, error: Option<&str>) -> String {
    let next = html_escape(next);
    let username = html_escape(username);
    let error = error
        .map(|e| format!(r#"<p class="errornote">{}</p>"#, html_escape(e)))
        .unwrap_or_default();

    let body = format!(
        r##"<h1>Log in</h1>
        {error}
        <form method="post" action="/login">
            <input type="hidden" name="next" value="{next}">
            <p><label for="id_username">Username</label>
               <input type="text" name="username" id="id_username" value="{username}" required></p>
            <p><label for="id_password">Password</label>
               <input type="password" name="password" id="id_password" required></p>
            <button type="submit">Log in</button>
        </form>"##
    );

    page("Log in", &body)
}
