use std::io;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use tracker_backend::config::Settings;
use tracker_backend::{services, state};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::new().map_err(io::Error::other)?;
    let repository = web::Data::new(state::build_repository(&settings).map_err(io::Error::other)?);

    info!(
        "Server running at http://{}:{} (sheet '{}', {} store)",
        settings.host,
        settings.port,
        settings.sheet_name,
        repository.backend_tag()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(repository.clone())
            .service(services::applications::configure_routes())
    })
        .bind((settings.host.as_str(), settings.port))?
        .run()
        .await
}
