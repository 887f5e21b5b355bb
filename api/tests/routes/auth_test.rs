#[cfg(test)]
mod tests {
    use crate::helpers::{body_text, form_request, make_test_app, session_cookie};
    use axum::{
        body::Body as AxumBody,
        http::{
            Request, StatusCode,
            header::{COOKIE, LOCATION, SET_COOKIE},
        },
    };
    use tower::ServiceExt;
    use util::config;

    #[tokio::test]
    async fn login_page_renders_with_next() {
        let t = make_test_app().await;

        let req = Request::builder()
            .uri("/login?next=%2Fupdate%2F1")
            .body(AxumBody::empty())
            .unwrap();
        let response = t.app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"name="next" value="/update/1""#));
        assert!(body.contains(r#"name="password""#));
    }

    #[tokio::test]
    async fn login_sets_session_cookie_and_redirects_to_next() {
        let t = make_test_app().await;
        let uri = format!("/update/{}", t.ticket.id);

        let response = t
            .app
            .clone()
            .oneshot(form_request(
                "POST",
                "/login",
                None,
                &[("username", "staff"), ("password", "password123"), ("next", uri.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], uri.as_str());

        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.starts_with(&format!("{}=", config::session_cookie_name())));
        assert!(set_cookie.contains("HttpOnly"));

        // The issued cookie opens the staff pages.
        let cookie = set_cookie.split(';').next().unwrap().to_string();
        let req = Request::builder()
            .uri(&uri)
            .header(COOKIE, cookie)
            .body(AxumBody::empty())
            .unwrap();
        let response = t.app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Sample ticket"));
    }

    #[tokio::test]
    async fn bad_credentials_rerender_the_form() {
        let t = make_test_app().await;

        let response = t
            .app
            .oneshot(form_request(
                "POST",
                "/login",
                None,
                &[("username", "staff"), ("password", "wrong"), ("next", "/")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
        let body = body_text(response).await;
        assert!(body.contains("Invalid username or password"));
        assert!(body.contains(r#"value="staff""#));
    }

    #[tokio::test]
    async fn empty_credentials_rerender_the_form() {
        let t = make_test_app().await;

        let response = t
            .app
            .oneshot(form_request("POST", "/login", None, &[("username", "")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Invalid username or password"));
    }

    #[tokio::test]
    async fn external_next_falls_back_to_root() {
        let t = make_test_app().await;

        let response = t
            .app
            .oneshot(form_request(
                "POST",
                "/login",
                None,
                &[
                    ("username", "staff"),
                    ("password", "password123"),
                    ("next", "//evil.example/"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn logout_clears_cookie_and_redirects_to_login() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);

        let response = t
            .app
            .oneshot(form_request("POST", "/logout", Some(&cookie), &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/login");
        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with(&format!("{}=", config::session_cookie_name())));
    }
}
