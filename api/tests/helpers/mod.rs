pub mod app;

pub use app::{
    StaticAuthenticator, TestApp, body_text, form_request, make_test_app,
    make_test_app_with, multipart_request, session_cookie,
};
