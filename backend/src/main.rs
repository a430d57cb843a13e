use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use article_gate::config::Config;
use article_gate::gate::AccessPolicy;
use article_gate::seed::seed_demo;
use article_gate::services;
use article_gate::session::{MemorySessionStore, Sessions};
use article_gate::store::Database;
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    let db = Database::new(&config.database_path);
    db.init_schema().map_err(io::Error::other)?;
    if config.seed_demo {
        seed_demo(&db).map_err(io::Error::other)?;
    }

    let key = config.session_key().map_err(io::Error::other)?;
    let store = MemorySessionStore::with_ttl(config.session_ttl);
    let sessions = web::Data::new(
        Sessions::new(Arc::new(store), key).with_max_age(config.session_ttl),
    );
    let policy = web::Data::new(AccessPolicy {
        login_field: config.login_field,
        view_limit: config.view_limit,
    });
    let db = web::Data::new(db);

    info!(
        "Server running at http://{}:{} (database {}, login by {}, {} views per session, sessions idle out after {}s)",
        config.host,
        config.port,
        config.database_path.display(),
        config.login_field,
        config.view_limit,
        config.session_ttl.as_secs()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(16 * 1024))
            .app_data(db.clone())
            .app_data(sessions.clone())
            .app_data(policy.clone())
            .configure(services::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
