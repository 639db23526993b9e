use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::models::{ClientError, ClientResult, Product, ProductId, Stock};

/// Catalog lookups needed by the cart
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch a product by id, `None` if the catalog has no such product
    async fn find_product(&self, product_id: ProductId) -> ClientResult<Option<Product>>;
}

/// Stock lookups needed by the cart
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the quantity currently available for a product
    async fn get_stock(&self, product_id: ProductId) -> ClientResult<Stock>;
}

/// REST client for the storefront API (`/products/{id}` and `/stock/{id}`)
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl {
                message: format!("expected an http(s) URL, got '{}'", base_url),
            });
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn product_url(&self, product_id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, product_id)
    }

    fn stock_url(&self, product_id: ProductId) -> String {
        format!("{}/stock/{}", self.base_url, product_id)
    }
}

/// Decode a product body. A `null`, empty object or empty body means no product.
fn decode_product(url: &str, body: &str) -> ClientResult<Option<Product>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })?;

    let is_empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
}

#[async_trait]
impl CatalogService for ApiClient {
    #[instrument(skip(self))]
    async fn find_product(&self, product_id: ProductId) -> ClientResult<Option<Product>> {
        let url = self.product_url(product_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            info!("Product not found in catalog");
            return Ok(None);
        }

        if !status.is_success() {
            warn!("Catalog returned status {}", status);
            return Err(ClientError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_product(&url, &body)
    }
}

#[async_trait]
impl StockService for ApiClient {
    #[instrument(skip(self))]
    async fn get_stock(&self, product_id: ProductId) -> ClientResult<Stock> {
        let url = self.stock_url(product_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Stock service returned status {}", status);
            return Err(ClientError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let stock: Stock = serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })?;

        debug!("Stock available: {}", stock.amount);
        Ok(stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_find_product_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let product = client_for(&server).find_product(1).await.unwrap().unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.price, dec!(179.9));
    }

    #[tokio::test]
    async fn test_find_product_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
            .mount(&server)
            .await;

        let product = client_for(&server).find_product(42).await.unwrap();
        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_find_product_empty_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        assert!(client_for(&server).find_product(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_product_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        match client_for(&server).find_product(1).await {
            Err(ClientError::UnexpectedStatus { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/products/1"));
            }
            other => panic!("Expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_stock_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "amount": 5})))
            .expect(1)
            .mount(&server)
            .await;

        let stock = client_for(&server).get_stock(3).await.unwrap();
        assert_eq!(stock, Stock { id: 3, amount: 5 });
    }

    #[tokio::test]
    async fn test_get_stock_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).get_stock(3).await,
            Err(ClientError::Decode { .. })
        ));
    }

    #[test]
    fn test_new_rejects_non_http_url() {
        let result = ApiClient::new("localhost:3333", Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3333/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.stock_url(2), "http://localhost:3333/stock/2");
    }

    #[test]
    fn test_decode_product_null() {
        assert!(decode_product("u", "null").unwrap().is_none());
        assert!(decode_product("u", "  ").unwrap().is_none());
        assert!(decode_product("u", "[1, 2]").is_err());
    }
}
