use std::process;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};

use ecoleta::db::establish_connection_pool;
use ecoleta::models::config::ServerConfig;
use ecoleta::repository::DieselRepository;
use ecoleta::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load server configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open database {}: {e}", server_config.database_url);
            process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let address = (server_config.address.clone(), server_config.port);
    log::info!("Starting registry on {}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(routes::configure)
            .service(Files::new("/uploads", &server_config.uploads_dir))
    })
    .bind(address)?
    .run()
    .await
}
