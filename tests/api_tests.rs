use pizza_backend::{
    AppConfig, AppState, create_router,
    models::{Order, OrderStatus, OrderStatusResponse, Pizza, TokenResponse},
};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

/// Boots the full server on an ephemeral port with a seeded admin account.
async fn spawn_app() -> TestApp {
    let config = AppConfig::default();
    let state = AppState::in_memory(config);
    state.seed_admin().await.expect("Failed to seed admin");
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = spawn_app().await;
    let doc: serde_json::Value = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/pizza"].is_object());
    assert!(doc["paths"]["/order/status/{id}"].is_object());
}

#[tokio::test]
async fn test_admin_builds_menu_and_customer_orders() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Admin logs in with the seeded credentials.
    let login: TokenResponse = client
        .post(format!("{}/user/login", app.address))
        .json(&json!({ "username": "admin", "password": "admin" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let created = client
        .post(format!("{}/pizza", app.address))
        .bearer_auth(&login.token)
        .json(&json!({ "name": "Marinara", "price": 7.0, "ingredients": ["tomato", "garlic"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);

    let menu: Vec<Pizza> = client
        .get(format!("{}/pizza", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(menu.iter().filter(|p| p.name == "Marinara").count(), 1);

    // Anonymous customer orders three of them.
    let order: Order = client
        .post(format!("{}/order", app.address))
        .json(&json!({ "items": [{ "pizza_name": "Marinara", "quantity": 3 }] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Placed);
    assert!((order.total_price - 21.0).abs() < 1e-9);

    // Admin force-cancels; the public status endpoint reflects it.
    let forced = client
        .put(format!("{}/order/{}", app.address, order.id))
        .bearer_auth(&login.token)
        .send()
        .await
        .unwrap();
    assert!(forced.status().is_success());

    let status: OrderStatusResponse = client
        .get(format!("{}/order/status/{}", app.address, order.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status.status, OrderStatus::Cancelled);
}
