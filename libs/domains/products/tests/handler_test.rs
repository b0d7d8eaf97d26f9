//! Handler tests for the products domain
//!
//! Exercise the catalog router in isolation over the in-memory repository:
//! public reads, admin-only writes, status codes and body shapes.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_helpers::{Role, SessionConfig, SessionManager, SessionUser};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

const SECRET: &str = "products-handler-test-secret-0123456789";

fn sessions() -> SessionManager {
    SessionManager::new(&SessionConfig::new(SECRET), false)
}

fn cookie_for(role: Role, builder: &TestDataBuilder) -> String {
    let user = SessionUser::new(builder.user_id(), "tester", role);
    let token = sessions().issue(&user).unwrap();
    format!("token={}", token)
}

fn app(repo: InMemoryProductRepository) -> Router {
    handlers::router(ProductService::new(repo), sessions())
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_request(cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_admin_can_create_product() {
    let builder = TestDataBuilder::from_test_name("admin_create_product");
    let cookie = cookie_for(Role::Admin, &builder);

    let response = app(InMemoryProductRepository::new())
        .oneshot(create_request(
            Some(&cookie),
            json!({ "name": "Teapot", "price": 8900, "image": "/uploads/teapot.jpeg" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["product"]["name"], "Teapot");
    assert_eq!(body["product"]["price"], 8900);
}

#[tokio::test]
async fn test_regular_user_cannot_create_product() {
    let builder = TestDataBuilder::from_test_name("user_create_product");
    let cookie = cookie_for(Role::User, &builder);

    let response = app(InMemoryProductRepository::new())
        .oneshot(create_request(
            Some(&cookie),
            json!({ "name": "Teapot", "price": 8900 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_product_without_session_is_unauthorized() {
    let response = app(InMemoryProductRepository::new())
        .oneshot(create_request(None, json!({ "name": "Teapot", "price": 8900 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let builder = TestDataBuilder::from_test_name("admin_create_invalid");
    let cookie = cookie_for(Role::Admin, &builder);

    let response = app(InMemoryProductRepository::new())
        .oneshot(create_request(
            Some(&cookie),
            json!({ "name": "", "price": -100 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn test_list_products_is_public() {
    let repo = InMemoryProductRepository::new();
    repo.create(CreateProduct {
        name: "Spoon".to_string(),
        price: 300,
        image: "/uploads/spoon.jpeg".to_string(),
    })
    .await
    .unwrap();

    let response = app(repo)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["products"][0]["name"], "Spoon");
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let builder = TestDataBuilder::from_test_name("get_missing_product");
    let id = builder.uuid(1);

    let response = app(InMemoryProductRepository::new())
        .oneshot(
            Request::builder()
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains(&id.to_string()));
}

#[tokio::test]
async fn test_get_product_rejects_malformed_id() {
    let response = app(InMemoryProductRepository::new())
        .oneshot(
            Request::builder()
                .uri("/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_can_update_price() {
    let builder = TestDataBuilder::from_test_name("admin_update_price");
    let cookie = cookie_for(Role::Admin, &builder);
    let repo = InMemoryProductRepository::new();
    let product = repo
        .create(CreateProduct {
            name: "Fork".to_string(),
            price: 400,
            image: "/uploads/fork.jpeg".to_string(),
        })
        .await
        .unwrap();

    let response = app(repo.clone())
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", product.id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(json!({ "price": 450 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["product"]["price"], 450);
    assert_eq!(body["product"]["name"], "Fork");

    let stored = repo.get_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(stored.price, 450);
}
