use actix_web::{HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::items::list_items as list_items_service;

#[get("/items")]
pub async fn list_items(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match list_items_service(repo.get_ref(), &server_config.public_url) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err),
    }
}
