use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::handlers::{
    auth, calendar, connections, files, finance, health, messages, progress, tasks, users,
};
use api::middleware::auth::AuthMiddleware;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with JSON support
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,api=debug,actix_web=info".into());

    let is_json = std::env::var("LOG_FORMAT").unwrap_or_default() == "json";

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }

    let config = Config::from_env()?;
    let config_data = web::Data::new(config.clone());
    tracing::info!("Starting TutorHub API server...");

    // Connects and applies pending migrations
    let db = infrastructure::database::init_database(&config.database_url).await?;

    let server_addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", server_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(AuthMiddleware)
            .app_data(web::Data::new(db.clone()))
            .app_data(config_data.clone())
            // Health
            .service(health::root)
            .service(health::health_check)
            // Auth
            .service(auth::register)
            .service(auth::login)
            // Users
            .service(users::get_code)
            .service(users::list_students)
            .service(users::create_student)
            .service(users::update_name)
            .service(users::delete_account)
            // Connections
            .service(connections::request_connection)
            .service(connections::list_connections)
            .service(connections::list_pending)
            .service(connections::approve_connection)
            .service(connections::reject_connection)
            // Calendar
            .service(calendar::create_event)
            .service(calendar::list_events)
            .service(calendar::update_event)
            .service(calendar::delete_event)
            // Finance
            .service(finance::create_transaction)
            .service(finance::list_transactions)
            .service(finance::finance_stats)
            .service(finance::confirm_payment)
            .service(finance::clear_history)
            // Messages
            .service(messages::send_message)
            .service(messages::list_conversations)
            .service(messages::get_conversation)
            .service(messages::mark_read)
            // Files
            .service(files::create_file)
            .service(files::list_files)
            .service(files::storage_stats)
            .service(files::delete_file)
            // Progress
            .service(progress::record_progress)
            .service(progress::list_progress)
            .service(progress::progress_stats)
            // Tasks
            .service(tasks::create_task)
            .service(tasks::list_tasks)
            .service(tasks::update_task)
            .service(tasks::delete_task)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
