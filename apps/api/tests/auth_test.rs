use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use api::config::Config;
use api::handlers::{auth, users};
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
    // A single connection keeps every query on the same in-memory database.
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("Failed to connect DB");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

#[actix_web::test]
async fn test_register_login_flow() {
    let db = test_db().await;
    let config = test_config();

    let app = test::init_service(
        App::new()
            .wrap(AuthMiddleware)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(auth::register)
            .service(auth::login)
            .service(users::get_code)
            .service(users::update_name),
    )
    .await;

    // 1. Register a tutor
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "tutor@example.com",
            "password": "secret123",
            "name": "Alice Tutor",
            "role": "tutor"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().expect("token").to_string();
    assert_eq!(body["user"]["email"], "tutor@example.com");
    assert_eq!(body["user"]["role"], "tutor");
    assert!(body["user"]["password"].is_null(), "hash must not leak");

    // 2. Registering the same email and role again conflicts
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "tutor@example.com",
            "password": "secret123",
            "name": "Alice Again",
            "role": "tutor"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "CONFLICT");

    // 3. The same email may hold a student account
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "tutor@example.com",
            "password": "secret123",
            "name": "Alice As Student",
            "role": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 4. Login with the right password
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "tutor@example.com",
            "password": "secret123",
            "role": "tutor"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 5. Wrong password is rejected without leaking which part was wrong
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "tutor@example.com",
            "password": "wrong-password",
            "role": "tutor"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "AUTHENTICATION_FAILED");

    // 6. Login pinned to a role with no account under that role
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "nobody@example.com",
            "password": "secret123",
            "role": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 7. Protected route without a token
    let req = test::TestRequest::get().uri("/users/code").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 8. Garbage token is rejected by the middleware
    let req = test::TestRequest::get()
        .uri("/users/code")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 9. With a valid token the connection code comes back
    let req = test::TestRequest::get()
        .uri("/users/code")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let code = body["code"].as_str().expect("code");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    // 10. The code is stable across calls
    let req = test::TestRequest::get()
        .uri("/users/code")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"].as_str().expect("code"), code);

    // 11. Rename the account
    let req = test::TestRequest::put()
        .uri("/users/profile/name")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "name": "Alice Renamed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Alice Renamed");
}

#[actix_web::test]
async fn test_register_validation() {
    let db = test_db().await;
    let config = test_config();

    let app = test::init_service(
        App::new()
            .wrap(AuthMiddleware)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(auth::register),
    )
    .await;

    // Short password
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "short@example.com",
            "password": "abc",
            "name": "Shorty",
            "role": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    // Malformed email
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "not-an-email",
            "password": "secret123",
            "name": "Bad Email",
            "role": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_delete_account() {
    let db = test_db().await;
    let config = test_config();

    let app = test::init_service(
        App::new()
            .wrap(AuthMiddleware)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(auth::register)
            .service(auth::login)
            .service(users::delete_account),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({
            "email": "gone@example.com",
            "password": "secret123",
            "name": "Soon Gone",
            "role": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().expect("token").to_string();

    let req = test::TestRequest::delete()
        .uri("/users/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The account is gone; logging in again fails
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "gone@example.com",
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Deleting again reports the missing row
    let req = test::TestRequest::delete()
        .uri("/users/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
