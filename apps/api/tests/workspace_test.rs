use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use api::config::Config;
use api::handlers::{auth, connections, files, progress, tasks, users};
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

#[actix_web::test]
async fn test_file_sharing_and_storage() {
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
            .service(files::create_file)
            .service(files::list_files)
            .service(files::storage_stats)
            .service(files::delete_file),
    )
    .await;

    let (tutor_token, _tutor_id) = register!(app, "alice@example.com", "Alice Lee", "tutor");
    let (bob_token, bob_id) = register!(app, "bob@example.com", "Bob Stone", "student");
    let (carol_token, carol_id) = register!(app, "carol@example.com", "Carol Ray", "student");
    connect!(app, tutor_token, bob_token);

    // 1. A file pinned to an unconnected student is refused
    let req = test::TestRequest::post()
        .uri("/files")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "name": "Refused.pdf",
            "type": "document",
            "size": "1 MB",
            "assigned_to_id": carol_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 2. One file for Bob, one shared with every connected student
    let req = test::TestRequest::post()
        .uri("/files")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "name": "Algebra Notes.pdf",
            "type": "document",
            "size": "2.5 MB",
            "subject": "Math",
            "assigned_to_id": bob_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "document");
    assert_eq!(body["assigned_to_id"].as_i64(), Some(bob_id as i64));

    let req = test::TestRequest::post()
        .uri("/files")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "name": "Syllabus.pdf",
            "type": "document",
            "size": "512 KB"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let shared_id = body["id"].as_i64().expect("id");

    // 3. Bob sees both, with the uploader embedded
    let req = test::TestRequest::get()
        .uri("/files")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let listed = body.as_array().expect("array");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["uploaded_by"]["name"], "Alice Lee");

    // 4. Carol sees nothing
    let req = test::TestRequest::get()
        .uri("/files")
        .insert_header(("Authorization", format!("Bearer {}", carol_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().expect("array").len(), 0);

    // 5. Storage usage sums the size labels against the 5 GB quota
    let req = test::TestRequest::get()
        .uri("/files/storage")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["used"].as_f64(), Some(3145728.0));
    assert_eq!(body["used_formatted"], "3.00 MB");
    assert_eq!(body["total"].as_f64(), Some(5.0 * 1024.0 * 1024.0 * 1024.0));
    assert_eq!(body["total_formatted"], "5 GB");

    // 6. Deleting the shared file takes it out of Bob's view
    let req = test::TestRequest::delete()
        .uri(&format!("/files/{}", shared_id))
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/files")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let listed = body.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Algebra Notes.pdf");
}

#[actix_web::test]
async fn test_progress_tracking() {
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
            .service(progress::record_progress)
            .service(progress::list_progress)
            .service(progress::progress_stats),
    )
    .await;

    let (tutor_token, tutor_id) = register!(app, "alice@example.com", "Alice Lee", "tutor");
    let (bob_token, bob_id) = register!(app, "bob@example.com", "Bob Stone", "student");
    let (_carol_token, carol_id) = register!(app, "carol@example.com", "Carol Ray", "student");
    connect!(app, tutor_token, bob_token);

    // 1. The tutor records progress for Bob
    let req = test::TestRequest::post()
        .uri("/progress")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "subject": "Math",
            "progress": 80,
            "grade": "B+",
            "hours_studied": 2.5,
            "lessons_completed": 3,
            "student_id": bob_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 2. Bob records his own entry against his connected tutor
    let req = test::TestRequest::post()
        .uri("/progress")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .set_json(serde_json::json!({
            "subject": "Physics",
            "progress": 90,
            "hours_studied": 1.2,
            "tutor_id": tutor_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 3. Progress for an unconnected student is refused
    let req = test::TestRequest::post()
        .uri("/progress")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "subject": "Math",
            "progress": 10,
            "student_id": carol_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 4. Out-of-range percentages never land
    let req = test::TestRequest::post()
        .uri("/progress")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "subject": "Math",
            "progress": 150,
            "student_id": bob_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 5. Both sides see both entries
    let req = test::TestRequest::get()
        .uri("/progress")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let entries = body.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["tutor"]["name"], "Alice Lee");

    // 6. Overall stats: mean completion rounded, hours rounded
    let req = test::TestRequest::get()
        .uri("/progress/stats")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["overall_progress"].as_i64(), Some(85));
    assert_eq!(body["total_hours"].as_i64(), Some(4));
}

#[actix_web::test]
async fn test_task_assignment() {
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
            .service(tasks::create_task)
            .service(tasks::list_tasks)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .await;

    let (tutor_token, _tutor_id) = register!(app, "alice@example.com", "Alice Lee", "tutor");
    let (bob_token, bob_id) = register!(app, "bob@example.com", "Bob Stone", "student");
    let (carol_token, carol_id) = register!(app, "carol@example.com", "Carol Ray", "student");
    connect!(app, tutor_token, bob_token);

    // 1. Status and priority default when omitted
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "title": "Finish worksheet",
            "assigned_to_id": bob_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let worksheet_id = body["id"].as_i64().expect("id");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["priority"], "medium");

    // 2. Assignment to an unconnected student is refused
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({
            "title": "Refused",
            "assigned_to_id": carol_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 3. A personal task with no assignee is fine
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({ "title": "Prep slides", "priority": "high" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 4. Bob sees only what is assigned to him, with the author embedded
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let listed = body.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Finish worksheet");
    assert_eq!(listed[0]["user"]["name"], "Alice Lee");

    // 5. The tutor sees both of theirs
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().expect("array").len(), 2);

    // 6. Without a single connection even your own tasks stay hidden
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", carol_token)))
        .set_json(serde_json::json!({ "title": "Self task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", carol_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().expect("array").len(), 0);

    // 7. The assignee can move the task along
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", worksheet_id))
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .set_json(serde_json::json!({ "status": "completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "completed");

    // 8. Updating a task that does not exist
    let req = test::TestRequest::patch()
        .uri("/tasks/99999")
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .set_json(serde_json::json!({ "status": "completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 9. Delete reports success either way
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", worksheet_id))
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", worksheet_id))
        .insert_header(("Authorization", format!("Bearer {}", tutor_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Task deleted successfully");
}
