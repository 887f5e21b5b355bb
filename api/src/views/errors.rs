use super::layout::page;

pub fn not_found() -> String {
    page(
        "Not found",
        r#"<h1>Not found</h1><p>The requested ticket does not exist.</p>"#,
    )
}

pub fn server_error() -> String {
    page(
        "Server error",
        r#"<h1>Something went wrong</h1><p>The request could not be completed. Please try again later.</p>"#,
    )
}
