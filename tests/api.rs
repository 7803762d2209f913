use actix_web::{App, http::StatusCode, test, web};
use ecoleta::dto::items::ItemDto;
use ecoleta::dto::points::{CreatePointDto, PointDetailDto, PointDto};
use ecoleta::models::config::ServerConfig;
use ecoleta::repository::DieselRepository;
use ecoleta::routes;

mod common;

fn server_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        address: "127.0.0.1".into(),
        port: 3333,
        public_url: "http://localhost:3333".into(),
        uploads_dir: "uploads".into(),
    }
}

fn create_body(name: &str, city: &str, items: Vec<i32>) -> CreatePointDto {
    CreatePointDto {
        name: name.into(),
        email: "contato@ponto.com.br".into(),
        whatsapp: "47999990000".into(),
        region: "SC".into(),
        city: city.into(),
        latitude: -26.9194,
        longitude: -49.0661,
        items,
        image: None,
    }
}

#[actix_web::test]
async fn registry_round_trip() {
    let test_db = common::TestDb::new();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(DieselRepository::new(test_db.pool())))
            .app_data(web::Data::new(server_config()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/items").to_request();
    let items: Vec<ItemDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items.len(), 6);
    assert_eq!(items[0].image_url, "http://localhost:3333/uploads/lampadas.svg");

    let req = test::TestRequest::post()
        .uri("/points")
        .set_json(create_body("Mercado Central", "Blumenau", vec![3]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: PointDetailDto = test::read_body_json(resp).await;
    assert_eq!(created.city, "Blumenau");
    assert_eq!(created.point.items[0].id, 3);

    let req = test::TestRequest::post()
        .uri("/points")
        .set_json(create_body("Eco Ponto", "Blumenau", vec![1]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/points?region=SC&city=Blumenau&items=3")
        .to_request();
    let points: Vec<PointDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].name, "Mercado Central");

    let req = test::TestRequest::get()
        .uri("/points?region=SC&city=Blumenau&items=1&items=3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let repeated: Vec<PointDto> = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri("/points?region=SC&city=Blumenau&items=1,3")
        .to_request();
    let joined: Vec<PointDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(repeated.len(), 2);
    assert_eq!(repeated, joined);

    let req = test::TestRequest::get()
        .uri(&format!("/points/{}", created.point.id))
        .to_request();
    let detail: PointDetailDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail, created);
}

#[actix_web::test]
async fn rejects_invalid_requests() {
    let test_db = common::TestDb::new();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(DieselRepository::new(test_db.pool())))
            .app_data(web::Data::new(server_config()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/points")
        .set_json(create_body("Sem Itens", "Blumenau", vec![]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/points")
        .set_json(create_body("Item Fantasma", "Blumenau", vec![42]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/points?region=SC&city=Blumenau&items=abc")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get().uri("/points/999").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
