#[cfg(test)]
mod tests {
    use crate::helpers::{body_text, form_request, make_test_app, multipart_request, session_cookie};
    use axum::http::{StatusCode, header::LOCATION};
    use db::models::{
        follow_up::Model as FollowUpModel,
        followup_attachment::Model as AttachmentModel,
        ticket::{Model as TicketModel, Priority},
        ticket_custom_field_value::Model as ValueModel,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn missing_title_redisplays_form_with_custom_fields() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let uri = format!("/update/{}", t.ticket.id);
        let queue = t.queue.id.to_string();
        let fields = [
            ("queue", queue.as_str()),
            ("body", "Test body"),
            ("priority", "3"),
        ];

        let mut bodies = Vec::new();
        for _ in 0..2 {
            let response = t
                .app
                .clone()
                .oneshot(form_request("POST", &uri, Some(&cookie), &fields))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_text(response).await;
            assert!(body.contains("There are errors in the form"));
            assert!(body.contains("Extra Info"));
            assert!(body.contains("This field is required."));
            assert!(body.contains("Test body"));
            bodies.push(body);
        }
        assert_eq!(bodies[0], bodies[1]);

        let stored = TicketModel::get_by_id(&t.db, t.ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Sample ticket");
        assert!(FollowUpModel::for_ticket(&t.db, t.ticket.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_update_redirects_to_ticket_and_persists() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let uri = format!("/update/{}", t.ticket.id);
        let queue = t.queue.id.to_string();

        let response = t
            .app
            .clone()
            .oneshot(form_request(
                "POST",
                &uri,
                Some(&cookie),
                &[
                    ("title", "Printer on fire"),
                    ("queue", queue.as_str()),
                    ("priority", "2"),
                    ("body", "Smoke"),
                    ("submitter_email", "submitter@example.com"),
                    ("custom_extra_info", "Floor 3"),
                    ("comment", "Called facilities"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[LOCATION].to_str().unwrap(),
            format!("/tickets/{}", t.ticket.id)
        );

        let stored = TicketModel::get_by_id(&t.db, t.ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Printer on fire");
        assert_eq!(stored.priority, Priority::High);

        let values = ValueModel::map_for_ticket(&t.db, t.ticket.id).await.unwrap();
        assert_eq!(values.get(&t.extra_info.id).map(String::as_str), Some("Floor 3"));

        let follow_ups = FollowUpModel::for_ticket(&t.db, t.ticket.id).await.unwrap();
        assert_eq!(follow_ups.len(), 1);
        assert_eq!(follow_ups[0].user_id, Some(t.staff.id));
        assert_eq!(follow_ups[0].comment, "Called facilities");
    }

    #[tokio::test]
    async fn overlong_custom_value_is_reported_next_to_the_field() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let uri = format!("/update/{}", t.ticket.id);
        let queue = t.queue.id.to_string();
        let long = "x".repeat(51);

        let response = t
            .app
            .oneshot(form_request(
                "POST",
                &uri,
                Some(&cookie),
                &[
                    ("title", "Sample ticket"),
                    ("queue", queue.as_str()),
                    ("priority", "3"),
                    ("extra_info", long.as_str()),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("There are errors in the form"));
        assert!(body.contains("Ensure this value has at most 50 characters (it has 51)."));
        assert!(body.contains(long.as_str()));
    }

    #[tokio::test]
    async fn multipart_update_stores_attachment() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let uri = format!("/update/{}", t.ticket.id);
        let queue = t.queue.id.to_string();

        let response = t
            .app
            .clone()
            .oneshot(multipart_request(
                &uri,
                &cookie,
                &[
                    ("title", "Sample ticket"),
                    ("queue", queue.as_str()),
                    ("priority", "3"),
                    ("submitter_email", "submitter@example.com"),
                    ("comment", "Log attached"),
                ],
                &[("server.log.txt", b"boot ok".as_slice())],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);

        let follow_ups = FollowUpModel::for_ticket(&t.db, t.ticket.id).await.unwrap();
        assert_eq!(follow_ups.len(), 1);
        let attachments = AttachmentModel::for_followups(&t.db, &[follow_ups[0].id])
            .await
            .unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].filename, "server.log.txt");
        assert_eq!(
            attachments[0].file,
            format!(
                "helpdesk/attachments/{}/{}/server.log.txt",
                t.ticket.id, follow_ups[0].id
            )
        );
        let stored = std::fs::read(t.storage.path().join(&attachments[0].file)).unwrap();
        assert_eq!(stored, b"boot ok".as_slice());
    }

    #[tokio::test]
    async fn disallowed_extension_is_a_form_error() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let uri = format!("/update/{}", t.ticket.id);
        let queue = t.queue.id.to_string();

        let response = t
            .app
            .oneshot(multipart_request(
                &uri,
                &cookie,
                &[
                    ("title", "Sample ticket"),
                    ("queue", queue.as_str()),
                    ("priority", "3"),
                ],
                &[("setup.EXE", b"MZ".as_slice())],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("There are errors in the form"));
        assert!(body.contains("Unsupported file extension: .exe"));
        assert!(body.contains("Extra Info"));

        assert!(FollowUpModel::for_ticket(&t.db, t.ticket.id).await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(t.storage.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn anonymous_post_changes_nothing() {
        let t = make_test_app().await;
        let uri = format!("/update/{}", t.ticket.id);
        let queue = t.queue.id.to_string();

        let response = t
            .app
            .oneshot(form_request(
                "POST",
                &uri,
                None,
                &[("title", "Hijacked"), ("queue", queue.as_str()), ("priority", "1")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(
            response.headers()[LOCATION]
                .to_str()
                .unwrap()
                .starts_with("/login?next=")
        );
        let stored = TicketModel::get_by_id(&t.db, t.ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Sample ticket");
    }

    #[tokio::test]
    async fn post_to_unknown_ticket_is_not_found() {
        let t = make_test_app().await;
        let cookie = session_cookie(&t.staff);
        let queue = t.queue.id.to_string();

        let response = t
            .app
            .oneshot(form_request(
                "POST",
                "/update/9999",
                Some(&cookie),
                &[("title", "x"), ("queue", queue.as_str()), ("priority", "3")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
