//! Handler tests for the products domain
//!
//! These drive the domain router directly (no `/api` prefix, no global
//! middleware) against a freshly seeded in-memory store per test:
//! - Request parsing and validation envelopes
//! - Response envelopes and status codes
//! - Listing behaviour as seen by HTTP clients

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

async fn seeded_app(repository: InMemoryProductRepository) -> Router {
    let service = ProductService::new(repository);
    service.seed_demo_catalog(Utc::now()).await.unwrap();
    handlers::router(service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

fn ids(data: &Value) -> Vec<u64> {
    data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_first_page_of_seeded_catalog_puts_featured_first() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/?page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["total"], 12);
    assert_eq!(data["page"], 1);
    assert_eq!(data["pageSize"], 12);
    assert_eq!(data["totalPages"], 1);

    let items = data["items"].as_array().unwrap();
    assert_eq!(items.len(), 12);
    let featured: Vec<bool> = items
        .iter()
        .map(|item| item["featured"].as_bool().unwrap())
        .collect();
    assert_eq!(&featured[..3], &[true, true, true]);
    assert!(featured[3..].iter().all(|f| !f));

    // Newest first inside the featured partition
    assert_eq!(&ids(data)[..3], &[1, 3, 7]);
}

#[tokio::test]
async fn test_list_item_shape() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (_, body) = get(&app, "/").await;
    let item = &body["data"]["items"][0];

    for key in [
        "id",
        "name",
        "code",
        "category",
        "primaryImage",
        "featured",
        "isNew",
        "onPromotion",
    ] {
        assert!(item.get(key).is_some(), "missing {key}");
    }
    assert!(item.get("discontinued").is_none());
    assert_eq!(item["name"], "Sofá 3 Lugares Premium");
    assert_eq!(item["isNew"], true);
}

#[tokio::test]
async fn test_repeated_listing_is_identical() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    for sort in ["name_asc", "category", "date_created", "popularity"] {
        let uri = format!("/?page=1&sort={sort}");
        let (_, first) = get(&app, &uri).await;
        let (_, second) = get(&app, &uri).await;
        assert_eq!(ids(&first["data"]), ids(&second["data"]), "sort={sort}");
    }
}

#[tokio::test]
async fn test_page_size_outside_allowed_set_is_rejected() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/?pageSize=50").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["field"], "pageSize");
    assert_eq!(details[0]["message"], "Page size must be 12, 24, 36, or 48");
}

#[tokio::test]
async fn test_all_query_violations_are_reported() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/?page=0&sort=price&view=table").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["page", "sort", "view"]);
}

#[tokio::test]
async fn test_unparseable_requests_use_validation_envelope() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    for (uri, field) in [
        ("/?page=1&page=2", "query"),
        ("/%FF", "path"),
        ("/category/%FF", "path"),
        ("/category/Quarto?sort=name_asc&sort=name_desc", "query"),
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        assert_eq!(body["error"]["details"][0]["field"], field, "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_json_body_uses_validation_envelope() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "body");
}

#[tokio::test]
async fn test_fractional_notation_for_whole_numbers_is_accepted() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/?page=1.0&pageSize=1.2e1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["pageSize"], 12);

    let (status, body) = get(&app, "/?page=1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "page");
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/?page=2&pageSize=12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 12);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_discontinued_is_fetchable_but_never_listed() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, _) = send(&app, "PATCH", "/5", Some(json!({ "discontinued": true }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 5);
    assert_eq!(body["data"]["discontinued"], true);
    assert!(body["data"].get("dateCreated").is_some());

    let (_, body) = get(&app, "/?pageSize=48").await;
    assert_eq!(body["data"]["total"], 11);
    assert!(!ids(&body["data"]).contains(&5));
}

#[tokio::test]
async fn test_get_product_invalid_and_unknown_ids() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "id");

    let (status, body) = get(&app, "/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = get(&app, "/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Product not found");
}

#[tokio::test]
async fn test_category_listing() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/category/Escrit%C3%B3rio?sort=name_asc").await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total"], 3);

    let names: Vec<&str> = data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Cadeira de Escritório Ergonômica",
            "Escrivaninha Executiva",
            "Estante para Livros"
        ]
    );
}

#[tokio::test]
async fn test_category_match_is_case_sensitive() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, _) = get(&app, "/category/Quarto").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/category/quarto").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (_, body) = get(&app, "/?category=quarto").await;
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["totalPages"], 0);
}

#[tokio::test]
async fn test_empty_category_is_not_found() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = get(&app, "/category/Banheiro").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "No products found in this category");
}

#[tokio::test]
async fn test_create_update_delete_lifecycle() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": "Banqueta Alta",
            "code": "MOV-0013",
            "category": "Cozinha",
            "primaryImage": "/images/products/product-13.jpg",
            "onPromotion": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 13);
    assert_eq!(body["data"]["isNew"], true);
    assert_eq!(body["data"]["featured"], false);

    let (status, body) = send(&app, "PATCH", "/13", Some(json!({ "name": "Banqueta" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Banqueta");
    assert_eq!(body["data"]["code"], "MOV-0013");

    let (status, body) = send(&app, "DELETE", "/13", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = get(&app, "/13").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/13", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleted ids are not handed out again
    let (_, body) = send(&app, "POST", "/", Some(json!({ "name": "Banco" }))).await;
    assert_eq!(body["data"]["id"], 14);
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = send(&app, "POST", "/", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "name");

    let (status, body) = send(
        &app,
        "PATCH",
        "/1",
        Some(json!({ "code": "X".repeat(51) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "code");
}

#[tokio::test]
async fn test_update_unknown_product_is_not_found() {
    let app = seeded_app(InMemoryProductRepository::new()).await;

    let (status, body) = send(&app, "PATCH", "/404", Some(json!({ "featured": true }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_beyond_capacity_is_internal_error() {
    let app = seeded_app(InMemoryProductRepository::with_max_records(12)).await;

    let (status, body) = send(&app, "POST", "/", Some(json!({ "name": "Banco" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "An internal server error occurred");
}
