use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use enrollment_engine::{
    db::memory::default_events,
    db_types::CatalogKind,
    Catalogs,
    InMemoryCatalog,
};
use ldg_common::Secret;
use serde_json::json;

use super::helpers::{call, json};
use crate::{middleware::ADMIN_KEY_HEADER, routes::CatalogRoute};

fn catalogs() -> Catalogs<InMemoryCatalog> {
    Catalogs::new(InMemoryCatalog::with_events(default_events()), InMemoryCatalog::new())
}

fn configure(admin_key: Option<&str>) -> impl FnOnce(&mut web::ServiceConfig) {
    let admin_key = admin_key.map(|k| Secret::new(k.to_string()));
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(catalogs())).service(
            web::scope("/api")
                .service(CatalogRoute::<InMemoryCatalog>::new(CatalogKind::Events, admin_key.clone()))
                .service(CatalogRoute::<InMemoryCatalog>::new(CatalogKind::Workshops, admin_key)),
        );
    }
}

#[actix_web::test]
async fn list_and_fetch_events() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(None))).await;
    let (status, body) = call(&service, TestRequest::get().uri("/api/adminDetail/eventdetail")).await;
    assert_eq!(status, StatusCode::OK);
    let events = json(&body);
    assert_eq!(events.as_array().map(Vec::len), Some(2));
    assert_eq!(events[1]["price"], "1,999 Rs");
    assert_eq!(events[1]["imageUrl"].as_str().map(|s| s.starts_with("https://")), Some(true));

    let (status, body) = call(&service, TestRequest::get().uri("/api/adminDetail/eventdetail?id=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["title"], "Web Development Bootcamp");

    let (status, body) = call(&service, TestRequest::get().uri("/api/adminDetail/eventdetail/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["id"], 1);
}

#[actix_web::test]
async fn unknown_ids_are_not_found() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(None))).await;
    for uri in ["/api/adminDetail/eventdetail?id=99", "/api/adminDetail/eventdetail?id=abc", "/api/workshops?id=1"] {
        let (status, body) = call(&service, TestRequest::get().uri(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json(&body), json!({ "message": "Event not found" }));
    }
}

#[actix_web::test]
async fn create_update_delete() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(None))).await;
    let new_event = json!({
        "title": "Rust for Beginners",
        "instructor": "Ferris",
        "date": "January 10, 2025",
        "location": "Online",
        "price": "499 Rs",
        "imageUrl": "https://example.com/rust.png",
        "description": "Two days of Rust",
        "highlights": ["Hands-on"],
        "agenda": [{ "time": "10:00 AM", "session": "Ownership", "speaker": "Ferris" }]
    });
    let req = TestRequest::post().uri("/api/adminDetail/eventdetail").set_json(&new_event);
    let (status, body) = call(&service, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json(&body);
    assert_eq!(created["id"], 3);
    assert_eq!(created["organizer"], "Ferris");
    assert_eq!(created["version"], 1);

    let update = json!({ "id": 3, "version": 1, "price": "599 Rs" });
    let req = TestRequest::put().uri("/api/adminDetail/eventdetail").set_json(&update);
    let (status, body) = call(&service, req).await;
    assert_eq!(status, StatusCode::OK);
    let updated = json(&body);
    assert_eq!(updated["price"], "599 Rs");
    assert_eq!(updated["title"], "Rust for Beginners");
    assert_eq!(updated["version"], 2);

    // The same update again carries a stale version
    let req = TestRequest::put().uri("/api/adminDetail/eventdetail").set_json(&update);
    let (status, _) = call(&service, req).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let req = TestRequest::put().uri("/api/adminDetail/eventdetail").set_json(json!({ "id": 42, "title": "x" }));
    let (status, _) = call(&service, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&service, TestRequest::delete().uri("/api/adminDetail/eventdetail?id=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["title"], "Rust for Beginners");
    let (status, _) = call(&service, TestRequest::delete().uri("/api/adminDetail/eventdetail?id=3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&service, TestRequest::delete().uri("/api/adminDetail/eventdetail/1")).await;
    assert_eq!(status, StatusCode::OK);

    // Deleted ids are never handed out again
    let req = TestRequest::post().uri("/api/adminDetail/eventdetail").set_json(json!({ "title": "Next" }));
    let (_, body) = call(&service, req).await;
    assert_eq!(json(&body)["id"], 4);

    let (_, body) = call(&service, TestRequest::get().uri("/api/adminDetail/eventdetail")).await;
    let ids = json(&body).as_array().map(|a| a.iter().map(|e| e["id"].clone()).collect::<Vec<_>>());
    assert_eq!(ids, Some(vec![json!(2), json!(4)]));
}

#[actix_web::test]
async fn catalogs_are_independent() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(None))).await;
    let req = TestRequest::post().uri("/api/workshops").set_json(json!({ "title": "Resume clinic", "price": "Free" }));
    let (status, body) = call(&service, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body)["id"], 1);
    let (_, body) = call(&service, TestRequest::get().uri("/api/workshops")).await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));
    let (_, body) = call(&service, TestRequest::get().uri("/api/adminDetail/eventdetail")).await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn other_methods_are_not_allowed() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(None))).await;
    let req = TestRequest::patch().uri("/api/adminDetail/eventdetail").set_json(json!({ "id": 1 }));
    let (status, body) = call(&service, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json(&body), json!({ "message": "Method not allowed" }));
}

#[actix_web::test]
async fn admin_key_guards_writes() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(Some("letmein")))).await;
    let (status, _) = call(&service, TestRequest::get().uri("/api/adminDetail/eventdetail")).await;
    assert_eq!(status, StatusCode::OK);

    let req = TestRequest::post().uri("/api/adminDetail/eventdetail").set_json(json!({ "title": "x" }));
    let (status, _) = call(&service, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = TestRequest::delete().uri("/api/adminDetail/eventdetail?id=1").insert_header((ADMIN_KEY_HEADER, "nope"));
    let (status, _) = call(&service, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = TestRequest::post()
        .uri("/api/adminDetail/eventdetail")
        .insert_header((ADMIN_KEY_HEADER, "letmein"))
        .set_json(json!({ "title": "x" }));
    let (status, _) = call(&service, req).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn unsupported_verbs_are_not_allowed_with_a_key() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(Some("letmein")))).await;
    let (status, body) = call(&service, TestRequest::patch().uri("/api/adminDetail/eventdetail")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json(&body), json!({ "message": "Method not allowed" }));
}

#[actix_web::test]
async fn updates_without_a_usable_id_are_not_found() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(App::new().configure(configure(None))).await;
    for body in [json!({ "title": "No id" }), json!({ "id": "abc", "title": "Bad id" })] {
        let req = TestRequest::put().uri("/api/workshops").set_json(body);
        let (status, body) = call(&service, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body), json!({ "message": "Event not found" }));
    }
    let req = TestRequest::post()
        .uri("/api/workshops")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, body) = call(&service, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].as_str().is_some_and(|e| e.starts_with("Could not read request body")));
}
