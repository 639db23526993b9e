use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use rocketshoes_cart::repositories::{FileStorage, LocalStorageCartRepository};
use rocketshoes_cart::services::{ApiClient, CartContext, CartStore};
use serde_json::json;
use tokio::net::TcpListener;

type StockState = Arc<Mutex<HashMap<u64, u32>>>;

#[derive(Clone)]
struct MockApiState {
    products: Arc<HashMap<u64, serde_json::Value>>,
    stock: StockState,
}

pub struct TestEnvironment {
    pub base_url: String,
    stock: StockState,
}

fn sample_products() -> HashMap<u64, serde_json::Value> {
    let products = vec![
        json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
        }),
        json!({
            "id": 2,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"
        }),
        json!({
            "id": 3,
            "title": "Tênis Adidas Duramo Lite 2.0",
            "price": 219.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis3.jpg"
        }),
        json!({
            "id": 5,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"
        }),
        json!({
            "id": 6,
            "title": "Tênis Adidas Duramo Lite 2.0",
            "price": 219.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis3.jpg"
        }),
    ];

    products
        .into_iter()
        .map(|product| (product["id"].as_u64().unwrap(), product))
        .collect()
}

fn sample_stock() -> HashMap<u64, u32> {
    HashMap::from([(1, 3), (2, 5), (3, 2), (5, 5), (6, 10)])
}

// Mock handlers for testing
async fn mock_get_product(
    UrlPath(product_id): UrlPath<u64>,
    State(state): State<MockApiState>,
) -> Response {
    match state.products.get(&product_id) {
        Some(product) => Json(product.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn mock_get_stock(
    UrlPath(product_id): UrlPath<u64>,
    State(state): State<MockApiState>,
) -> Response {
    let stock = state.stock.lock().unwrap();
    match stock.get(&product_id) {
        Some(amount) => Json(json!({ "id": product_id, "amount": amount })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

fn create_mock_app(stock: StockState) -> Router {
    let state = MockApiState {
        products: Arc::new(sample_products()),
        stock,
    };

    Router::new()
        .route("/products/:product_id", get(mock_get_product))
        .route("/stock/:product_id", get(mock_get_stock))
        .with_state(state)
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let stock: StockState = Arc::new(Mutex::new(sample_stock()));
        let app = create_mock_app(stock.clone());

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self { base_url, stock }
    }

    /// Change the stock the mock API reports for a product
    pub fn set_stock(&self, product_id: u64, amount: u32) {
        self.stock.lock().unwrap().insert(product_id, amount);
    }

    pub fn api_client(&self) -> Arc<ApiClient> {
        Arc::new(
            ApiClient::new(&self.base_url, Duration::from_secs(5))
                .expect("Failed to build API client"),
        )
    }

    /// Build a store against the mock API, persisting under `storage_dir`
    pub fn cart_store(&self, storage_dir: &Path) -> CartStore {
        let api = self.api_client();
        let repository = Arc::new(LocalStorageCartRepository::new(Arc::new(
            FileStorage::new(storage_dir),
        )));

        CartStore::new(api.clone(), api, repository)
    }

    pub fn cart_context(&self, storage_dir: &Path) -> CartContext {
        CartContext::new(self.cart_store(storage_dir))
    }
}
