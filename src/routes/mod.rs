use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod items;
pub mod points;

/// Register the registry endpoints on an actix application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(items::list_items)
        .service(points::list_points)
        .service(points::show_point)
        .service(points::create_point);
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Map a service failure onto an HTTP response with a JSON error body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(error) | ServiceError::TypeConstraint(error) => {
            HttpResponse::BadRequest().json(ErrorBody { error })
        }
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}
