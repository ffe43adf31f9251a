use crate::helpers::{spawn_app, spawn_app_with, TestApp};
use httpmock::prelude::*;
use notifications::events::NotificationEvent;
use std::time::Duration;

fn welcome_email() -> serde_json::Value {
    serde_json::json!({
        "channel": "email",
        "recipient": "ursula_le_guin@gmail.com",
        "template": "welcome",
        "context": {"name": "Ursula"},
        "subject": "Welcome!"
    })
}

fn verification_sms() -> serde_json::Value {
    serde_json::json!({
        "channel": "sms",
        "recipient": "+7 908 796 47 81",
        "message": "Your code: 1234"
    })
}

async fn status_of(response: reqwest::Response) -> (u16, serde_json::Value) {
    let code = response.status().as_u16();
    let body = response.json().await.expect("Response body was not JSON.");
    (code, body)
}

async fn wait_for_emails(app: &TestApp, expected: usize) {
    for _ in 0..50 {
        if app.sent_emails().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "Expected {} emails to be sent, {} were",
        expected,
        app.sent_emails().len()
    );
}

#[tokio::test]
async fn emails_are_sent_through_the_mailer() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_notification(&welcome_email(), &[]).await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 200);
    assert_eq!(
        body,
        serde_json::json!({"success": true, "message": "Message sent successfully"})
    );
    let emails = app.sent_emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].recipient, "ursula_le_guin@gmail.com");
    assert_eq!(emails[0].template, "welcome");
    assert_eq!(emails[0].subject.as_deref(), Some("Welcome!"));
    assert_eq!(emails[0].context["name"], "Ursula");
}

#[tokio::test]
async fn sms_are_sent_through_the_gateway() {
    // arrange
    let app = spawn_app().await;
    let gateway = app
        .sms_server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api2.php")
                .json_body(serde_json::json!({
                    "apikey": "XXXXXXXX",
                    "send": [{"from": "INFORM", "to": "79087964781", "text": "Your code: 1234"}]
                }));
            then.status(200).json_body(serde_json::json!({
                "send": [{"server_id": "10000", "phone": "79087964781", "price": "1.68", "status": "0"}],
                "balance": "11908.50",
                "cost": "1.68"
            }));
        })
        .await;

    // act
    let response = app.post_notification(&verification_sms(), &[]).await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 200);
    assert_eq!(body["success"], true);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("| id > 10000 | phone > 79087964781 | price > 1.68 | status > 0 | status meaning > new |"));
    gateway.assert_async().await;
}

#[tokio::test]
async fn blocked_sender_is_reported_as_an_event() {
    // arrange
    let mut app = spawn_app().await;
    app.sms_server
        .mock_async(|when, then| {
            when.method(POST).path("/api2.php");
            then.status(200).json_body(serde_json::json!({
                "error": {"code": "241", "description": "Sender is blocked"}
            }));
        })
        .await;

    // act
    let response = app.post_notification(&verification_sms(), &[]).await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 200);
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Error 241 while sending message to 79087964781"
        })
    );
    let event = tokio::time::timeout(Duration::from_secs(1), app.events.recv())
        .await
        .expect("No event was raised.")
        .unwrap();
    assert_eq!(
        event,
        NotificationEvent::SmsBlockedByService {
            recipient: "79087964781".into(),
            error: "241 - Sender is blocked".into(),
        }
    );
}

#[tokio::test]
async fn sms_are_not_sent_from_debug_deployments() {
    // arrange
    let app = spawn_app_with(|c| c.application.debug = true).await;
    let gateway = app
        .sms_server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    // act
    let response = app.post_notification(&verification_sms(), &[]).await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 200);
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Can not use SMS service with application.debug = true"
        })
    );
    gateway.assert_hits_async(0).await;
}

#[tokio::test]
async fn invalid_payloads_are_reported_and_not_sent() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({"channel": "email", "recipient": "definitely-not-an-email", "template": "welcome"}),
            "invalid email",
        ),
        (
            serde_json::json!({"channel": "email", "recipient": "ursula_le_guin@gmail.com", "template": ""}),
            "empty template",
        ),
    ];

    for (body, description) in test_cases {
        // act
        let response = app.post_notification(&body, &[]).await;

        // assert
        let (code, status) = status_of(response).await;
        assert_eq!(code, 200, "Unexpected status code when the payload had {}.", description);
        assert_eq!(
            status["success"], false,
            "The API did not report a failure when the payload had {}.",
            description
        );
        assert!(status["message"]
            .as_str()
            .unwrap()
            .contains("[EmailMessage validation error]"));
    }
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn explicit_provider_must_match_the_payload() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_notification(&welcome_email(), &[("provider", "SMS")])
        .await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 200);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Wrong notification kind provided"));
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn unknown_provider_returns_a_400() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_notification(&welcome_email(), &[("provider", "pigeon")])
        .await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 400);
    assert_eq!(body["error"], "Unknown provider short name \"pigeon\"");
}

#[tokio::test]
async fn deferred_notifications_are_sent_in_the_background() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_notification(&welcome_email(), &[("deferred", "true")])
        .await;

    // assert
    let (code, body) = status_of(response).await;
    assert_eq!(code, 202);
    assert!(body["job_id"]
        .as_str()
        .and_then(|id| uuid::Uuid::parse_str(id).ok())
        .is_some());
    wait_for_emails(&app, 1).await;
}

#[tokio::test]
async fn invalid_deferred_notifications_are_rejected() {
    // arrange
    let app = spawn_app().await;
    let body = serde_json::json!({"channel": "sms", "recipient": "79087964781", "message": " "});

    // act
    let response = app.post_notification(&body, &[("deferred", "true")]).await;

    // assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn malformed_payloads_return_a_400() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (serde_json::json!({"channel": "fax", "recipient": "123"}), "unknown channel"),
        (serde_json::json!({"channel": "sms", "recipient": "79087964781"}), "missing message"),
        (serde_json::json!({"recipient": "79087964781", "message": "Hi"}), "missing channel"),
    ];

    for (body, description) in test_cases {
        // act
        let response = app.post_notification(&body, &[]).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {}.",
            description
        );
    }
}

#[tokio::test]
async fn requests_missing_authorization_are_rejected() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = reqwest::Client::new()
        .post(&format!("{}/notifications", &app.address))
        .json(&welcome_email())
        .send()
        .await
        .expect("Failed to execute request.");

    // assert
    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        r#"Basic realm="notifications""#,
        response.headers()["WWW-Authenticate"]
    );
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn invalid_password_is_rejected() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = reqwest::Client::new()
        .post(&format!("{}/notifications", &app.address))
        .basic_auth(&app.test_user.username, Some(uuid::Uuid::new_v4().to_string()))
        .json(&welcome_email())
        .send()
        .await
        .expect("Failed to execute request.");

    // assert
    assert_eq!(401, response.status().as_u16());
    assert!(app.sent_emails().is_empty());
}
