use actix_web::{http::StatusCode, test, test::TestRequest, web, App};

use super::helpers::send_request;
use crate::{
    routes::{health, sitemap},
    sitemap::Sitemap,
};

#[actix_web::test]
async fn health_endpoint() {
    let (status, body) = send_request(TestRequest::get().uri("/health"), |cfg| {
        cfg.service(health);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn sitemap_endpoint() {
    let app = App::new().app_data(web::Data::new(Sitemap::new("https://learningdestiny.in"))).service(sitemap);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, TestRequest::get().uri("/sitemap.xml").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers().get("content-type").and_then(|v| v.to_str().ok()).map(String::from);
    assert_eq!(content_type.as_deref(), Some("application/xml"));
    let body = test::read_body(res).await;
    let xml = String::from_utf8_lossy(&body);
    assert_eq!(xml.matches("<url>").count(), 13);
    assert!(xml.contains("<loc>https://learningdestiny.in/events</loc>"));
}
