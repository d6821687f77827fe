use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use api::config::Config;
use api::handlers::{auth, connections, messages, users};
use api::middleware::auth::AuthMiddleware;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
    }
}

async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("Failed to connect DB");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

macro_rules! register {
    ($app:expr, $email:expr, $name:expr, $role:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({
                "email": $email,
                "password": "secret123",
                "name": $name,
                "role": $role
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "register {} failed", $email);
        let body: serde_json::Value = test::read_body_json(resp).await;
        (
            body["access_token"].as_str().expect("token").to_string(),
            body["user"]["id"].as_i64().expect("id") as i32,
        )
    }};
}

macro_rules! connect {
    ($app:expr, $owner_token:expr, $requester_token:expr) => {{
        let req = test::TestRequest::get()
            .uri("/users/code")
            .insert_header(("Authorization", format!("Bearer {}", $owner_token)))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let code = body["code"].as_str().expect("code").to_string();

        let req = test::TestRequest::post()
            .uri("/connections/request")
            .insert_header(("Authorization", format!("Bearer {}", $requester_token)))
            .set_json(serde_json::json!({ "code": code }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let connection_id = body["id"].as_i64().expect("id");

        let req = test::TestRequest::post()
            .uri(&format!("/connections/{}/approve", connection_id))
            .insert_header(("Authorization", format!("Bearer {}", $owner_token)))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }};
}

macro_rules! send_message {
    ($app:expr, $token:expr, $receiver:expr, $text:expr) => {{
        let req = test::TestRequest::post()
            .uri("/messages")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json(serde_json::json!({ "receiver_id": $receiver, "text": $text }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body
    }};
}

macro_rules! conversations {
    ($app:expr, $token:expr) => {{
        let req = test::TestRequest::get()
            .uri("/messages/conversations")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body.as_array().expect("array").clone()
    }};
}

#[actix_web::test]
async fn test_messaging_flow() {
    let db = test_db().await;
    let config = test_config();

    let app = test::init_service(
        App::new()
            .wrap(AuthMiddleware)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(auth::register)
            .service(users::get_code)
            .service(connections::request_connection)
            .service(connections::approve_connection)
            .service(messages::send_message)
            .service(messages::list_conversations)
            .service(messages::get_conversation)
            .service(messages::mark_read),
    )
    .await;

    let (tutor_token, tutor_id) = register!(app, "alice@example.com", "Alice Lee", "tutor");
    let (bob_token, bob_id) = register!(app, "bob@example.com", "Bob Stone", "student");
    let (carol_token, _carol_id) = register!(app, "carol@example.com", "Carol Ray", "student");
    connect!(app, tutor_token, bob_token);

    // 1. Messages only travel along approved connections
    let req = test::TestRequest::post()
        .uri("/messages")
        .insert_header(("Authorization", format!("Bearer {}", carol_token)))
        .set_json(serde_json::json!({ "receiver_id": tutor_id, "text": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 2. Bob writes twice; messages start unread
    let sent = send_message!(app, bob_token, tutor_id, "hi");
    assert_eq!(sent["read"], false);
    assert_eq!(sent["sender_id"].as_i64(), Some(bob_id as i64));
    send_message!(app, bob_token, tutor_id, "are we on for friday?");

    // 3. Alice's inbox shows one conversation with two unread
    let convos = conversations!(app, tutor_token);
    assert_eq!(convos.len(), 1);
    assert_eq!(convos[0]["id"].as_i64(), Some(bob_id as i64));
    assert_eq!(convos[0]["name"], "Bob Stone");
    assert_eq!(convos[0]["last_message"], "are we on for friday?");
    assert_eq!(convos[0]["unread"].as_u64(), Some(2));
    assert_eq!(convos[0]["avatar"], "BS");
    assert_eq!(convos[0]["time"], "Just now");

    // 4. Bob's own sent messages do not count against him
    let convos = conversations!(app, bob_token);
    assert_eq!(convos.len(), 1);
    assert_eq!(convos[0]["unread"].as_u64(), Some(0));

    // 5. The thread reads oldest-first
    let req = test::TestRequest::get()
        .uri(&format!("/messages/conversation/{}", bob_id))
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let thread = body.as_array().expect("array");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0]["text"], "hi");
    assert_eq!(thread[1]["text"], "are we on for friday?");

    // 6. Reading a thread with an unconnected user is refused
    let req = test::TestRequest::get()
        .uri(&format!("/messages/conversation/{}", bob_id))
        .insert_header(("Authorization", format!("Bearer {}", carol_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 7. Mark read clears the counter
    let req = test::TestRequest::post()
        .uri(&format!("/messages/{}/read", bob_id))
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let convos = conversations!(app, tutor_token);
    assert_eq!(convos[0]["unread"].as_u64(), Some(0));

    // 8. A reply flips the unread counter to Bob's side
    send_message!(app, tutor_token, bob_id, "yes, 10am");
    let convos = conversations!(app, bob_token);
    assert_eq!(convos[0]["unread"].as_u64(), Some(1));
    assert_eq!(convos[0]["last_message"], "yes, 10am");
    assert_eq!(convos[0]["name"], "Alice Lee");

    // 9. No connections, no conversations
    let convos = conversations!(app, carol_token);
    assert!(convos.is_empty());
}
