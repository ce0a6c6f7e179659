//! Naver Open API client (shopping search + captcha).
//!
//! Every call returns a typed `ProviderError` on failure; handlers decide
//! whether to degrade (empty results) or surface the error.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

/// Results per page for every shopping search.
pub const SEARCH_DISPLAY: u32 = 20;

/// Brands the storefront search is restricted to, as the provider indexes them.
pub const TARGET_BRANDS: [&str; 4] = ["빈폴", "엄브로", "데상트", "퓨마"];

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptchaKey {
    pub key: String,
    pub image_url: String,
}

/// Outbound shopping/captcha provider.
#[async_trait]
pub trait ShopProvider: Send + Sync {
    /// Plain search; returns the provider `items` array.
    async fn search(&self, query: &str) -> Result<Vec<Value>, ProviderError>;
    async fn issue_captcha(&self) -> Result<CaptchaKey, ProviderError>;
    async fn verify_captcha(&self, key: &str, value: &str) -> Result<bool, ProviderError>;
    /// Search restricted to `TARGET_BRANDS`; returns the raw provider body.
    async fn brand_scoped_search(
        &self,
        query: &str,
        category: &str,
        page: u32,
    ) -> Result<Value, ProviderError>;
}

/// `(brand1 OR brand2 ...) {category} {query}`, trimmed.
pub fn compose_brand_query(query: &str, category: &str) -> String {
    let brands = TARGET_BRANDS.join(" OR ");
    format!("({brands}) {} {}", category.trim(), query.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 1-based offset of the first result on `page` (page 1 -> 1, page 2 -> 21).
/// Saturates on huge page numbers instead of overflowing.
pub fn page_start(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(SEARCH_DISPLAY).saturating_add(1)
}

#[derive(Clone)]
pub struct NaverClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    api_base: String,
}

impl NaverClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.api_base, path);
        let resp = self
            .http
            .get(&url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let status = resp.status();
        if status != StatusCode::OK {
            debug!(%url, status = status.as_u16(), "provider returned non-200");
            return Err(ProviderError::Status(status.as_u16()));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    fn search_params(query: String, start: u32) -> Vec<(&'static str, String)> {
        vec![
            ("query", query),
            ("display", SEARCH_DISPLAY.to_string()),
            ("start", start.to_string()),
            ("sort", "sim".to_string()),
        ]
    }
}

#[async_trait]
impl ShopProvider for NaverClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Value>, ProviderError> {
        let body = self
            .get_json("/v1/search/shop.json", &Self::search_params(query.to_string(), 1))
            .await?;
        match body.get("items") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(ProviderError::Parse("response has no items array".into())),
        }
    }

    #[instrument(skip(self))]
    async fn issue_captcha(&self) -> Result<CaptchaKey, ProviderError> {
        let body = self
            .get_json("/v1/captcha/nkey", &[("code", "0".to_string())])
            .await?;
        let key = body
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::Parse("captcha response has no key".into()))?
            .to_string();
        let image_url = format!("{}/v1/captcha/ncaptcha.bin?key={}", self.api_base, key);
        Ok(CaptchaKey { key, image_url })
    }

    #[instrument(skip(self, value))]
    async fn verify_captcha(&self, key: &str, value: &str) -> Result<bool, ProviderError> {
        let body = self
            .get_json(
                "/v1/captcha/nkey",
                &[
                    ("code", "1".to_string()),
                    ("key", key.to_string()),
                    ("value", value.to_string()),
                ],
            )
            .await?;
        Ok(body.get("result").and_then(Value::as_bool).unwrap_or(false))
    }

    #[instrument(skip(self))]
    async fn brand_scoped_search(
        &self,
        query: &str,
        category: &str,
        page: u32,
    ) -> Result<Value, ProviderError> {
        let q = compose_brand_query(query, category);
        self.get_json("/v1/search/shop.json", &Self::search_params(q, page_start(page)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::get,
        Json, Router,
    };
    use std::collections::HashMap;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}", addr)
    }

    #[test]
    fn brand_query_joins_brands_with_or() {
        assert_eq!(
            compose_brand_query("후드티", "상의"),
            "(빈폴 OR 엄브로 OR 데상트 OR 퓨마) 상의 후드티"
        );
        assert_eq!(compose_brand_query("", ""), "(빈폴 OR 엄브로 OR 데상트 OR 퓨마)");
    }

    #[test]
    fn page_start_is_one_based() {
        assert_eq!(page_start(1), 1);
        assert_eq!(page_start(2), 21);
        assert_eq!(page_start(3), 41);
        assert_eq!(page_start(0), 1);
        assert_eq!(page_start(u32::MAX), u32::MAX);
    }

    #[tokio::test]
    async fn search_returns_items_and_forwards_credentials() {
        let app = Router::new().route(
            "/v1/search/shop.json",
            get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                let id = headers
                    .get("X-Naver-Client-Id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                let title = q.get("query").cloned().unwrap_or_default();
                Json(serde_json::json!({
                    "items": [{"title": title, "id": id, "display": q.get("display")}]
                }))
            }),
        );
        let base = spawn_stub(app).await;
        let client = NaverClient::new("cid", "secret", base);

        let items = client.search("jacket").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "jacket");
        assert_eq!(items[0]["id"], "cid");
        assert_eq!(items[0]["display"], "20");
    }

    #[tokio::test]
    async fn non_200_is_a_status_error() {
        let app = Router::new().route(
            "/v1/search/shop.json",
            get(|| async { AxumStatus::UNAUTHORIZED }),
        );
        let base = spawn_stub(app).await;
        let client = NaverClient::new("cid", "bad", base);

        let err = client.search("jacket").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status(401)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_network_error() {
        let client = NaverClient::new("cid", "secret", "http://127.0.0.1:1");
        let err = client.search("jacket").await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn captcha_issue_and_verify() {
        let app = Router::new().route(
            "/v1/captcha/nkey",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                match q.get("code").map(String::as_str) {
                    Some("0") => Json(serde_json::json!({"key": "abc123"})),
                    _ => {
                        let right = q.get("value").map(String::as_str) == Some("right");
                        Json(serde_json::json!({ "result": right }))
                    }
                }
            }),
        );
        let base = spawn_stub(app).await;
        let client = NaverClient::new("cid", "secret", base.clone());

        let issued = client.issue_captcha().await.unwrap();
        assert_eq!(issued.key, "abc123");
        assert_eq!(issued.image_url, format!("{base}/v1/captcha/ncaptcha.bin?key=abc123"));

        assert!(client.verify_captcha("abc123", "right").await.unwrap());
        assert!(!client.verify_captcha("abc123", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn brand_search_sends_offset() {
        let app = Router::new().route(
            "/v1/search/shop.json",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({"start": q.get("start"), "query": q.get("query")}))
            }),
        );
        let base = spawn_stub(app).await;
        let client = NaverClient::new("cid", "secret", base);

        let body = client.brand_scoped_search("코트", "", 3).await.unwrap();
        assert_eq!(body["start"], "41");
        assert_eq!(body["query"], "(빈폴 OR 엄브로 OR 데상트 OR 퓨마) 코트");
    }
}
