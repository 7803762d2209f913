use actix_web::{HttpResponse, Responder, get, post, web};

use crate::forms::points::{CreatePointForm, CreatePointPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::points::{
    PointsQueryParams, create_point as create_point_service, list_points as list_points_service,
    show_point as show_point_service,
};

#[get("/points")]
pub async fn list_points(
    params: web::Query<Vec<(String, String)>>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match list_points_service(
        PointsQueryParams::from_pairs(params.into_inner()),
        repo.get_ref(),
        &server_config.public_url,
    ) {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(err) => error_response(err),
    }
}

#[get("/points/{point_id}")]
pub async fn show_point(
    point_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match show_point_service(
        point_id.into_inner(),
        repo.get_ref(),
        &server_config.public_url,
    ) {
        Ok(point) => HttpResponse::Ok().json(point),
        Err(err) => error_response(err),
    }
}

#[post("/points")]
pub async fn create_point(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<CreatePointForm>,
) -> impl Responder {
    let payload: CreatePointPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_point_service(payload, repo.get_ref(), &server_config.public_url) {
        Ok(point) => HttpResponse::Created().json(point),
        Err(err) => error_response(err),
    }
}
