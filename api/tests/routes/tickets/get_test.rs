#[cfg(test)]
mod tests {
    use crate::helpers::{
        StaticAuthenticator, body_text, make_test_app, make_test_app_with, session_cookie,
    };
    use api::auth::{AuthOutcome, UserIdentity};
    use axum::{
        body::Body as AxumBody,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, COOKIE, LOCATION},
        },
    };
    use db::models::user::{ActiveModel as UserActiveModel, Model as UserModel};
    use sea_orm::{ActiveModelTrait, Set};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn get(uri: &str, cookie: Option<&str>) -> Request<AxumBody> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(AxumBody::empty()).unwrap()
    }

    #[tokio::test]
    async fn anonymous_users_are_redirected_to_login() {
        let t = make_test_app().await;
        let uri = format!("/update/{}", t.ticket.id);

        let response = t.app.oneshot(get(&uri, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response.headers()[LOCATION].to_str().unwrap();
        assert_eq!(location, format!("/login?next=%2Fupdate%2F{}", t.ticket.id));
    }

    #[tokio::test]
    async fn staff_see_the_form_with_custom_fields() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let uri = format!("/update/{}", t.ticket.id);

        let response = t.app.oneshot(get(&uri, Some(&cookie))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Sample ticket"));
        assert!(body.contains("Extra Info"));
        assert!(body.contains(r#"name="custom_extra_info""#));
        assert!(!body.contains("There are errors in the form"));
    }

    #[tokio::test]
    async fn bearer_tokens_are_accepted() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let token = cookie.split_once('=').unwrap().1.to_string();

        let req = Request::builder()
            .uri(format!("/update/{}", t.ticket.id))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(AxumBody::empty())
            .unwrap();
        let response = t.app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_staff_users_are_redirected_to_login() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.customer);

        let response = t
            .app
            .oneshot(get(&format!("/update/{}", t.ticket.id), Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(
            response.headers()[LOCATION]
                .to_str()
                .unwrap()
                .starts_with("/login?next=")
        );
    }

    #[tokio::test]
    async fn deactivated_users_lose_access() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        UserModel::set_active(&t.db, t.staff.id, false).await.unwrap();

        let response = t
            .app
            .oneshot(get(&format!("/update/{}", t.ticket.id), Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn demoted_staff_lose_access_with_an_existing_session() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);

        let mut demoted: UserActiveModel = t.staff.clone().into();
        demoted.is_staff = Set(false);
        demoted.update(&t.db).await.unwrap();

        let response = t
            .app
            .oneshot(get(&format!("/update/{}", t.ticket.id), Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn tampered_tokens_are_rejected() {
        let t = make_test_app().await;
        let cookie = format!("{}x", session_cookie(&t.staff));

        let response = t
            .app
            .oneshot(get(&format!("/update/{}", t.ticket.id), Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn unknown_ticket_is_not_found() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);

        let response = t.app.oneshot(get("/update/9999", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn detail_page_shows_ticket_and_custom_labels() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);

        let response = t
            .app
            .oneshot(get(&format!("/tickets/{}", t.ticket.id), Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Sample ticket"));
        assert!(body.contains("Test Queue"));
        assert!(body.contains("Extra Info"));
        assert!(body.contains("3. Normal"));
    }

    #[tokio::test]
    async fn ticket_list_links_to_tickets() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);

        let response = t.app.oneshot(get("/", Some(&cookie))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(&format!(r#"href="/tickets/{}""#, t.ticket.id)));
    }

    #[tokio::test]
    async fn injected_authenticator_decides_access() {
        let staff = UserIdentity {
            id: 1,
            username: "stub".into(),
            is_staff: true,
        };
        let t = make_test_app_with(Arc::new(StaticAuthenticator(AuthOutcome::Authenticated(
            staff,
        ))))
        .await;
        let response = t
            .app
            .oneshot(get(&format!("/update/{}", t.ticket.id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let t = make_test_app_with(Arc::new(StaticAuthenticator(AuthOutcome::Unauthenticated)))
            .await;
        let response = t
            .app
            .oneshot(get(&format!("/update/{}", t.ticket.id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn unknown_paths_are_plain_not_found() {
        let t = make_test_app().await;

        let response = t.app.oneshot(get("/nope", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
